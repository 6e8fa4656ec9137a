//! Handle for one select-type control, addressed by locator.
//!
//! The control is resolved fresh against live browser state on every
//! operation; nothing is cached between calls. Reads and selections all
//! await population first, so callers never observe a placeholder-only
//! option list.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::components::SelectElement;
use thirtyfour::{By, WebDriver};
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{self, OptionEntry, Selection};
use crate::source::OptionSource;
use crate::wait::{self, DEFAULT_POLL_INTERVAL, DEFAULT_POPULATE_TIMEOUT};

pub struct Dropdown<'d> {
	driver: &'d WebDriver,
	locator: By,
	label: String,
	timeout: Duration,
	interval: Duration,
}

impl<'d> Dropdown<'d> {
	pub fn new(driver: &'d WebDriver, locator: By) -> Self {
		let label = format!("{locator:?}");
		Self {
			driver,
			locator,
			label,
			timeout: DEFAULT_POPULATE_TIMEOUT,
			interval: DEFAULT_POLL_INTERVAL,
		}
	}

	/// Sets the label used in log lines and timeout conditions.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Sets the population-wait budget.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Sets the fixed poll interval of the population wait.
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.interval = interval;
		self
	}

	/// Resolves the control and wraps it in select semantics.
	async fn select_element(&self) -> Result<SelectElement> {
		let element = self.driver.find(self.locator.clone()).await?;
		Ok(SelectElement::new(&element).await?)
	}

	/// Snapshot of the current option list, in document order.
	async fn snapshot(&self) -> Result<Vec<OptionEntry>> {
		let select = self.select_element().await?;
		let mut entries = Vec::new();
		for option in select.options().await? {
			let text = option.text().await?;
			let value = option.attr("value").await?.unwrap_or_default();
			entries.push(OptionEntry::new(text, value));
		}
		Ok(entries)
	}

	/// Waits until the control holds more than one option and returns the
	/// populated snapshot.
	pub async fn wait_until_populated(&self) -> Result<Vec<OptionEntry>> {
		wait::wait_until_populated(self, &self.label, self.timeout, self.interval).await
	}

	/// Non-empty display texts of all options, after awaiting population.
	pub async fn option_texts(&self) -> Result<Vec<String>> {
		let options = self.wait_until_populated().await?;
		Ok(model::visible_texts(&options))
	}

	/// Non-empty underlying values of all options, after awaiting
	/// population.
	pub async fn option_values(&self) -> Result<Vec<String>> {
		let options = self.wait_until_populated().await?;
		Ok(model::non_empty_values(&options))
	}

	/// Selects the option whose value is exactly `target`, or degrades to
	/// the first option with a non-empty value when the target is absent.
	///
	/// The fallback is deliberate: a scenario should not hard-fail merely
	/// because a preferred value is transiently unavailable. One warning is
	/// emitted when it happens, and the returned [`Selection`] tells the
	/// caller which path was taken.
	pub async fn select_value_or_first(&self, target: &str) -> Result<Selection> {
		let options = self.wait_until_populated().await?;
		let selection = model::plan_selection(&options, target);

		match &selection {
			Selection::Exact { value } => {
				self.select_element().await?.select_by_value(value).await?;
			}
			Selection::Fallback { requested, value } => {
				self.select_element().await?.select_by_value(value).await?;
				warn!(
					target: "myrent.dropdown",
					control = %self.label,
					requested = %requested,
					selected = %value,
					"target value not found; selected first available"
				);
			}
			Selection::NoViableOption { requested } => {
				warn!(
					target: "myrent.dropdown",
					control = %self.label,
					requested = %requested,
					"target value not found and no option has a non-empty value"
				);
			}
		}

		Ok(selection)
	}

	/// Logs the visible option texts for diagnostics.
	pub async fn dump_options(&self) -> Result<()> {
		let texts = self.option_texts().await?;
		info!(
			target: "myrent.dropdown",
			control = %self.label,
			count = texts.len(),
			"option dump"
		);
		for text in texts {
			info!(target: "myrent.dropdown", control = %self.label, option = %text, "option");
		}
		Ok(())
	}
}

#[async_trait]
impl OptionSource for Dropdown<'_> {
	async fn options(&self) -> Result<Vec<OptionEntry>> {
		self.snapshot().await
	}
}
