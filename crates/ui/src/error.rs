use thirtyfour::error::WebDriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
	/// A bounded wait elapsed before its condition was satisfied.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// Any other driver failure (element not found, stale element, dead
	/// session) passes through unmodified.
	#[error(transparent)]
	Driver(#[from] WebDriverError),
}

impl UiError {
	/// Builds the timeout terminal for a wait that ran out of budget.
	pub fn timeout(budget: std::time::Duration, condition: impl Into<String>) -> Self {
		UiError::Timeout {
			ms: budget.as_millis() as u64,
			condition: condition.into(),
		}
	}
}
