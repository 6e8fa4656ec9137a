//! Bounded polling wait for asynchronously populated controls.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{Result, UiError};
use crate::model::OptionEntry;
use crate::source::OptionSource;

/// Default budget for the population wait.
pub const DEFAULT_POPULATE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fixed interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Polls `source` until its option list contains more than one entry.
///
/// The first entry is conventionally a placeholder, so a single-option
/// control counts as not populated. Returns the populated snapshot, or
/// [`UiError::Timeout`] once `timeout` elapses. The last poll lands exactly
/// on the timeout bound, so the error is raised after the budget elapses
/// and not before.
pub async fn wait_until_populated<S>(
	source: &S,
	control: &str,
	timeout: Duration,
	interval: Duration,
) -> Result<Vec<OptionEntry>>
where
	S: OptionSource + ?Sized,
{
	let start = Instant::now();

	loop {
		let options = source.options().await?;
		if options.len() > 1 {
			debug!(
				target: "myrent.dropdown",
				control,
				count = options.len(),
				elapsed_ms = start.elapsed().as_millis() as u64,
				"control populated"
			);
			return Ok(options);
		}

		let elapsed = start.elapsed();
		if elapsed >= timeout {
			return Err(UiError::timeout(
				timeout,
				format!("options of {control} to populate"),
			));
		}

		tokio::time::sleep(interval.min(timeout - elapsed)).await;
	}
}

#[cfg(test)]
mod tests {
	use async_trait::async_trait;

	use super::*;

	struct StaticSource(Vec<OptionEntry>);

	#[async_trait]
	impl OptionSource for StaticSource {
		async fn options(&self) -> Result<Vec<OptionEntry>> {
			Ok(self.0.clone())
		}
	}

	/// Placeholder-only until `ready_at`, then a second option appears.
	struct DelayedSource {
		ready_at: Instant,
	}

	impl DelayedSource {
		fn after(delay: Duration) -> Self {
			Self {
				ready_at: Instant::now() + delay,
			}
		}
	}

	#[async_trait]
	impl OptionSource for DelayedSource {
		async fn options(&self) -> Result<Vec<OptionEntry>> {
			let mut options = vec![OptionEntry::new("-- select --", "")];
			if Instant::now() >= self.ready_at {
				options.push(OptionEntry::new("CompanyA", "101"));
			}
			Ok(options)
		}
	}

	fn placeholder_only() -> Vec<OptionEntry> {
		vec![OptionEntry::new("-- select --", "")]
	}

	#[tokio::test(start_paused = true)]
	async fn populated_control_returns_immediately() {
		let source = StaticSource(vec![
			OptionEntry::new("-- select --", ""),
			OptionEntry::new("Alpha", "A1"),
		]);

		let start = Instant::now();
		let options =
			wait_until_populated(&source, "company", Duration::from_secs(5), DEFAULT_POLL_INTERVAL)
				.await
				.unwrap();

		assert_eq!(options.len(), 2);
		assert_eq!(start.elapsed(), Duration::ZERO);
	}

	#[tokio::test(start_paused = true)]
	async fn population_after_two_seconds_satisfies_a_five_second_wait() {
		let source = DelayedSource::after(Duration::from_secs(2));

		let start = Instant::now();
		let options =
			wait_until_populated(&source, "company", Duration::from_secs(5), DEFAULT_POLL_INTERVAL)
				.await
				.unwrap();

		assert_eq!(options[1], OptionEntry::new("CompanyA", "101"));
		assert!(start.elapsed() >= Duration::from_secs(2));
		assert!(start.elapsed() < Duration::from_secs(5));
	}

	#[tokio::test(start_paused = true)]
	async fn never_populated_control_times_out_at_the_bound() {
		let source = StaticSource(placeholder_only());
		let timeout = Duration::from_secs(3);

		let start = Instant::now();
		let err = wait_until_populated(&source, "company", timeout, DEFAULT_POLL_INTERVAL)
			.await
			.unwrap_err();

		assert!(matches!(err, UiError::Timeout { ms: 3000, .. }));
		assert!(start.elapsed() >= timeout);
	}

	#[tokio::test(start_paused = true)]
	async fn timeout_message_names_the_control() {
		let source = StaticSource(placeholder_only());

		let err = wait_until_populated(
			&source,
			"company",
			Duration::from_millis(500),
			DEFAULT_POLL_INTERVAL,
		)
		.await
		.unwrap_err();

		assert!(err.to_string().contains("company"));
	}
}
