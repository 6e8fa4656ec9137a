//! Suite configuration: TOML file plus environment overrides.
//!
//! Deployment-specific keys (WebDriver endpoint, application URLs,
//! credentials) can be overridden through `MYRENT_E2E_*` variables so the
//! same config file works across environments. Validation happens at load
//! time rather than mid-scenario.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HarnessError, Result};
use crate::types::BrowserKind;

/// Environment variable naming the config file path.
pub const CONFIG_ENV: &str = "MYRENT_E2E_CONFIG";

/// Config file consulted when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "e2e.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
	/// Browser engine to drive.
	#[serde(default)]
	pub browser: BrowserKind,

	/// WebDriver server endpoint (chromedriver/geckodriver/grid).
	#[serde(default = "default_webdriver_url")]
	pub webdriver_url: String,

	/// Login page URL of the deployment under test.
	pub base_url: String,

	/// URL the browser must land on after a successful login.
	pub home_url: String,

	/// Login credentials.
	pub username: String,
	pub password: String,

	/// Company code selected during login.
	pub company: String,

	/// Driver-side implicit wait applied to element location.
	#[serde(default = "default_implicit_wait_ms")]
	pub implicit_wait_ms: u64,

	/// Budget for the dropdown population wait.
	#[serde(default = "default_populate_timeout_ms")]
	pub populate_timeout_ms: u64,

	/// Fixed interval between population polls.
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,

	/// Run the browser headless.
	#[serde(default)]
	pub headless: bool,
}

fn default_webdriver_url() -> String {
	"http://localhost:9515".to_string()
}

fn default_implicit_wait_ms() -> u64 {
	10_000
}

fn default_populate_timeout_ms() -> u64 {
	15_000
}

fn default_poll_interval_ms() -> u64 {
	250
}

impl SuiteConfig {
	/// Loads and validates a config file, applying environment overrides.
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)
			.map_err(|err| HarnessError::Config(format!("cannot read {}: {err}", path.display())))?;
		let mut config: SuiteConfig = toml::from_str(&raw)?;
		config.apply_overrides(|key| std::env::var(key).ok())?;
		config.validate()?;
		Ok(config)
	}

	/// Loads the config file named by [`CONFIG_ENV`], falling back to
	/// [`DEFAULT_CONFIG_PATH`].
	pub fn from_env() -> Result<Self> {
		let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
		Self::load(Path::new(&path))
	}

	/// Applies `MYRENT_E2E_*` overrides from `lookup`.
	///
	/// Takes the lookup as a function so override behavior is testable
	/// without mutating process environment.
	pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		if let Some(value) = lookup("MYRENT_E2E_WEBDRIVER_URL") {
			self.webdriver_url = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_BASE_URL") {
			self.base_url = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_HOME_URL") {
			self.home_url = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_USERNAME") {
			self.username = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_PASSWORD") {
			self.password = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_COMPANY") {
			self.company = value;
		}
		if let Some(value) = lookup("MYRENT_E2E_BROWSER") {
			self.browser = value.parse()?;
		}
		if let Some(value) = lookup("MYRENT_E2E_HEADLESS") {
			self.headless = matches!(value.as_str(), "1" | "true" | "yes");
		}
		Ok(())
	}

	fn validate(&self) -> Result<()> {
		for (name, value) in [
			("webdriver_url", &self.webdriver_url),
			("base_url", &self.base_url),
			("home_url", &self.home_url),
		] {
			Url::parse(value)
				.map_err(|err| HarnessError::Config(format!("invalid {name} {value:?}: {err}")))?;
		}
		if self.username.is_empty() {
			return Err(HarnessError::Config("username must not be empty".to_string()));
		}
		if self.poll_interval_ms == 0 {
			return Err(HarnessError::Config("poll_interval_ms must be positive".to_string()));
		}
		Ok(())
	}

	/// Host and port of the WebDriver endpoint, for reachability probes.
	pub fn webdriver_addr(&self) -> Result<(String, u16)> {
		let url = Url::parse(&self.webdriver_url).map_err(|err| {
			HarnessError::Config(format!("invalid webdriver_url {:?}: {err}", self.webdriver_url))
		})?;
		let host = url
			.host_str()
			.ok_or_else(|| {
				HarnessError::Config(format!("webdriver_url {:?} has no host", self.webdriver_url))
			})?
			.to_string();
		let port = url.port_or_known_default().unwrap_or(4444);
		Ok((host, port))
	}

	pub fn implicit_wait(&self) -> Duration {
		Duration::from_millis(self.implicit_wait_ms)
	}

	pub fn populate_timeout(&self) -> Duration {
		Duration::from_millis(self.populate_timeout_ms)
	}

	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::io::Write;

	use super::*;

	const MINIMAL: &str = r#"
base_url = "https://myrent.example.com/login"
home_url = "https://myrent.example.com/home"
username = "qa-user"
password = "secret"
company = "101"
"#;

	fn minimal_config() -> SuiteConfig {
		toml::from_str(MINIMAL).unwrap()
	}

	#[test]
	fn minimal_file_gets_defaults() {
		let config = minimal_config();
		assert_eq!(config.browser, BrowserKind::Chrome);
		assert_eq!(config.webdriver_url, "http://localhost:9515");
		assert_eq!(config.implicit_wait(), Duration::from_secs(10));
		assert_eq!(config.populate_timeout(), Duration::from_secs(15));
		assert_eq!(config.poll_interval(), Duration::from_millis(250));
		assert!(!config.headless);
	}

	#[test]
	fn load_reads_validates_and_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(MINIMAL.as_bytes()).unwrap();

		let config = SuiteConfig::load(file.path()).unwrap();
		assert_eq!(config.username, "qa-user");
		assert_eq!(config.company, "101");
	}

	#[test]
	fn missing_file_is_a_config_error() {
		let err = SuiteConfig::load(Path::new("/nonexistent/e2e.toml")).unwrap_err();
		assert!(matches!(err, HarnessError::Config(_)));
	}

	#[test]
	fn overrides_replace_file_values() {
		let mut config = minimal_config();
		let env: HashMap<&str, &str> = HashMap::from([
			("MYRENT_E2E_BROWSER", "firefox"),
			("MYRENT_E2E_WEBDRIVER_URL", "http://grid:4444"),
			("MYRENT_E2E_HEADLESS", "true"),
			("MYRENT_E2E_COMPANY", "202"),
		]);

		config
			.apply_overrides(|key| env.get(key).map(|v| v.to_string()))
			.unwrap();

		assert_eq!(config.browser, BrowserKind::Firefox);
		assert_eq!(config.webdriver_url, "http://grid:4444");
		assert!(config.headless);
		assert_eq!(config.company, "202");
	}

	#[test]
	fn unknown_browser_override_is_rejected() {
		let mut config = minimal_config();
		let err = config
			.apply_overrides(|key| (key == "MYRENT_E2E_BROWSER").then(|| "safari".to_string()))
			.unwrap_err();
		assert!(matches!(err, HarnessError::Config(_)));
	}

	#[test]
	fn invalid_url_fails_validation() {
		let mut config = minimal_config();
		config.base_url = "not a url".to_string();
		assert!(config.validate().is_err());
	}

	#[test]
	fn webdriver_addr_splits_host_and_port() {
		let mut config = minimal_config();
		config.webdriver_url = "http://grid.internal:4444/wd/hub".to_string();
		assert_eq!(config.webdriver_addr().unwrap(), ("grid.internal".to_string(), 4444));
	}

	#[test]
	fn webdriver_addr_uses_scheme_default_port() {
		let mut config = minimal_config();
		config.webdriver_url = "http://localhost".to_string();

		let (host, port) = config.webdriver_addr().unwrap();
		assert_eq!((host.as_str(), port), ("localhost", 80));
	}
}
