use myrent_harness::HarnessError;
use myrent_ui::UiError;
use thirtyfour::error::WebDriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, E2eError>;

#[derive(Debug, Error)]
pub enum E2eError {
	/// A scenario assertion did not hold.
	#[error("check failed: {0}")]
	Check(String),

	#[error(transparent)]
	Ui(#[from] UiError),

	#[error(transparent)]
	Harness(#[from] HarnessError),

	#[error(transparent)]
	Driver(#[from] WebDriverError),
}

impl E2eError {
	pub fn check(message: impl Into<String>) -> Self {
		E2eError::Check(message.into())
	}
}
