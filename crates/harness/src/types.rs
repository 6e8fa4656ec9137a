use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Browser engine driven through the WebDriver server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
	/// Google Chrome via chromedriver.
	#[default]
	Chrome,
	/// Mozilla Firefox via geckodriver.
	Firefox,
}

impl fmt::Display for BrowserKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BrowserKind::Chrome => write!(f, "chrome"),
			BrowserKind::Firefox => write!(f, "firefox"),
		}
	}
}

impl FromStr for BrowserKind {
	type Err = HarnessError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"chrome" => Ok(BrowserKind::Chrome),
			"firefox" => Ok(BrowserKind::Firefox),
			other => Err(HarnessError::Config(format!("unknown browser kind: {other}"))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_and_parse_round_trip() {
		for kind in [BrowserKind::Chrome, BrowserKind::Firefox] {
			assert_eq!(kind.to_string().parse::<BrowserKind>().unwrap(), kind);
		}
	}

	#[test]
	fn parse_is_case_insensitive() {
		assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
	}

	#[test]
	fn unknown_kind_is_rejected() {
		assert!("webkit".parse::<BrowserKind>().is_err());
	}

	#[test]
	fn serde_uses_lowercase() {
		let json = serde_json::to_string(&BrowserKind::Chrome).unwrap();
		assert_eq!(json, "\"chrome\"");
	}
}
