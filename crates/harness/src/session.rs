//! Browser session lifecycle.
//!
//! A [`Session`] owns one WebDriver-backed browser instance. Sessions are
//! created at scenario start and destroyed at scenario end regardless of
//! outcome; [`with_session`] scopes both around a closure.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, TimeoutConfiguration, WebDriver};
use tokio::net::TcpStream;
use tracing::{info, warn};

use crate::config::SuiteConfig;
use crate::error::{HarnessError, Result};
use crate::registry::SessionRegistry;
use crate::types::BrowserKind;

pub type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One live browser instance owned by a single worker.
pub struct Session {
	driver: WebDriver,
	browser: BrowserKind,
}

impl Session {
	/// Launches a browser per the suite configuration: capabilities for
	/// the configured engine, maximized window, configured implicit wait.
	pub async fn launch(config: &SuiteConfig) -> Result<Self> {
		let driver = match config.browser {
			BrowserKind::Chrome => {
				let mut caps = DesiredCapabilities::chrome();
				if config.headless {
					caps.add_arg("--headless=new")?;
				}
				WebDriver::new(&config.webdriver_url, caps).await?
			}
			BrowserKind::Firefox => {
				let mut caps = DesiredCapabilities::firefox();
				if config.headless {
					caps.add_arg("-headless")?;
				}
				WebDriver::new(&config.webdriver_url, caps).await?
			}
		};

		driver.maximize_window().await?;
		driver
			.update_timeouts(TimeoutConfiguration::new(None, None, Some(config.implicit_wait())))
			.await?;

		info!(target: "myrent.session", browser = %config.browser, "browser started");
		Ok(Self {
			driver,
			browser: config.browser,
		})
	}

	pub fn driver(&self) -> &WebDriver {
		&self.driver
	}

	pub fn browser(&self) -> BrowserKind {
		self.browser
	}

	pub async fn goto(&self, url: &str) -> Result<()> {
		self.driver.goto(url).await?;
		Ok(())
	}

	pub async fn current_url(&self) -> Result<String> {
		Ok(self.driver.current_url().await?.to_string())
	}

	/// Quits the browser and ends the WebDriver session.
	pub async fn close(self) -> Result<()> {
		self.driver.quit().await?;
		info!(target: "myrent.session", "browser closed");
		Ok(())
	}
}

/// Runs `f` with a fresh session owned by `worker`.
///
/// The worker's registry slot is claimed before launch and released after
/// teardown, and the session is closed regardless of the closure's
/// outcome. A close failure after a scenario failure is logged rather than
/// masking the scenario error.
pub async fn with_session<T, E, F>(
	config: &SuiteConfig,
	registry: &SessionRegistry,
	worker: &str,
	f: F,
) -> std::result::Result<T, E>
where
	E: From<HarnessError>,
	F: for<'s> FnOnce(&'s Session) -> BoxFut<'s, std::result::Result<T, E>>,
{
	registry.register(worker, config.browser)?;

	let session = match Session::launch(config).await {
		Ok(session) => session,
		Err(err) => {
			registry.release(worker);
			return Err(err.into());
		}
	};

	let res = f(&session).await;
	let closed = session.close().await;
	registry.release(worker);

	match res {
		Ok(value) => {
			closed?;
			Ok(value)
		}
		Err(err) => {
			if let Err(close_err) = closed {
				warn!(
					target: "myrent.session",
					worker,
					error = %close_err,
					"failed to close session after scenario error"
				);
			}
			Err(err)
		}
	}
}

/// Whether the configured WebDriver endpoint accepts TCP connections.
///
/// Used to skip live scenarios in environments without a driver rather
/// than failing the whole run.
pub async fn endpoint_reachable(config: &SuiteConfig) -> bool {
	let Ok((host, port)) = config.webdriver_addr() else {
		return false;
	};
	matches!(
		tokio::time::timeout(Duration::from_secs(2), TcpStream::connect((host.as_str(), port))).await,
		Ok(Ok(_))
	)
}
