use thirtyfour::error::WebDriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
	#[error("configuration error: {0}")]
	Config(String),

	/// The worker already owns an active session; the association must be
	/// strictly one to one.
	#[error("worker {worker} already owns an active session")]
	SessionBusy { worker: String },

	#[error(transparent)]
	Parse(#[from] toml::de::Error),

	#[error(transparent)]
	Driver(#[from] WebDriverError),
}
