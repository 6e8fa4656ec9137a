//! Explicit worker-to-session association.
//!
//! The map replaces implicit thread-local storage: the scenario pool
//! multiplexes tasks over threads, so the 1:1 invariant is tracked per
//! logical worker and cleared on teardown.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{HarnessError, Result};
use crate::types::BrowserKind;

#[derive(Debug, Default)]
pub struct SessionRegistry {
	active: DashMap<String, BrowserKind>,
}

impl SessionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the worker's session slot.
	///
	/// Fails with [`HarnessError::SessionBusy`] when the worker already
	/// owns an active session.
	pub fn register(&self, worker: &str, browser: BrowserKind) -> Result<()> {
		match self.active.entry(worker.to_string()) {
			Entry::Occupied(_) => Err(HarnessError::SessionBusy {
				worker: worker.to_string(),
			}),
			Entry::Vacant(slot) => {
				slot.insert(browser);
				Ok(())
			}
		}
	}

	/// Clears the worker's slot; returns whether a session was registered.
	pub fn release(&self, worker: &str) -> bool {
		self.active.remove(worker).is_some()
	}

	pub fn is_active(&self, worker: &str) -> bool {
		self.active.contains_key(worker)
	}

	pub fn active_count(&self) -> usize {
		self.active.len()
	}
}
