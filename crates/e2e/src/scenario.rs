//! Scenario definitions.
//!
//! Each scenario runs on its own browser session and expresses one
//! end-to-end check against the deployment under test.

use std::time::Duration;

use myrent_harness::{BoxFut, Session, SuiteConfig};
use myrent_ui::Selection;
use tokio::time::Instant;

use crate::error::{E2eError, Result};
use crate::pages::LoginPage;

/// A company code no deployment is expected to carry, used to force the
/// fallback path.
const ABSENT_COMPANY: &str = "ZZ-ABSENT-999";

type ScenarioFn = for<'a> fn(&'a Session, &'a SuiteConfig) -> BoxFut<'a, Result<()>>;

#[derive(Clone)]
pub struct Scenario {
	pub name: &'static str,
	pub description: &'static str,
	exec: ScenarioFn,
}

impl Scenario {
	pub async fn run(&self, session: &Session, config: &SuiteConfig) -> Result<()> {
		(self.exec)(session, config).await
	}
}

/// All scenarios of the suite, in execution order.
pub fn all() -> Vec<Scenario> {
	vec![
		Scenario {
			name: "login_valid",
			description: "valid user lands on the home page",
			exec: |session, config| Box::pin(login_valid(session, config)),
		},
		Scenario {
			name: "login_page_ui",
			description: "login controls are visible",
			exec: |session, config| Box::pin(login_page_ui(session, config)),
		},
		Scenario {
			name: "company_options_listed",
			description: "company dropdown populates with matching texts and values",
			exec: |session, config| Box::pin(company_options_listed(session, config)),
		},
		Scenario {
			name: "company_select_fallback",
			description: "absent company code degrades to the first available option",
			exec: |session, config| Box::pin(company_select_fallback(session, config)),
		},
	]
}

async fn login_valid(session: &Session, config: &SuiteConfig) -> Result<()> {
	let page = LoginPage::new(session);
	page.open(&config.base_url).await?;

	let selection = page.login(config).await?;
	if let Selection::NoViableOption { requested } = &selection {
		return Err(E2eError::check(format!(
			"no selectable company option (requested {requested})"
		)));
	}

	let landed = wait_for_url_containing(
		session,
		&config.home_url,
		config.populate_timeout(),
		config.poll_interval(),
	)
	.await?;

	if !urls_match(&landed, &config.home_url) {
		return Err(E2eError::check(format!(
			"expected home url {} but landed on {landed}",
			config.home_url
		)));
	}
	Ok(())
}

async fn login_page_ui(session: &Session, config: &SuiteConfig) -> Result<()> {
	let page = LoginPage::new(session);
	page.open(&config.base_url).await?;

	let missing = page.missing_controls().await?;
	if !missing.is_empty() {
		return Err(E2eError::check(format!(
			"login controls not visible: {}",
			missing.join(", ")
		)));
	}
	Ok(())
}

async fn company_options_listed(session: &Session, config: &SuiteConfig) -> Result<()> {
	let page = LoginPage::new(session);
	page.open(&config.base_url).await?;

	let dropdown = page.company_dropdown(config);
	dropdown.dump_options().await?;

	let texts = dropdown.option_texts().await?;
	let values = dropdown.option_values().await?;

	if texts.is_empty() {
		return Err(E2eError::check("company dropdown has no visible options"));
	}
	// The placeholder keeps its label but carries no value, so texts may
	// exceed values by at most one.
	if values.len() > texts.len() || texts.len() - values.len() > 1 {
		return Err(E2eError::check(format!(
			"option texts ({}) and values ({}) diverge beyond the placeholder",
			texts.len(),
			values.len()
		)));
	}
	Ok(())
}

async fn company_select_fallback(session: &Session, config: &SuiteConfig) -> Result<()> {
	let page = LoginPage::new(session);
	page.open(&config.base_url).await?;

	let selection = page
		.company_dropdown(config)
		.select_value_or_first(ABSENT_COMPANY)
		.await?;

	match selection {
		Selection::Fallback { value, .. } => {
			if value.trim().is_empty() {
				return Err(E2eError::check("fallback selected an empty value"));
			}
			Ok(())
		}
		Selection::Exact { .. } => Err(E2eError::check(format!(
			"company code {ABSENT_COMPANY} unexpectedly exists in the deployment"
		))),
		Selection::NoViableOption { .. } => {
			Err(E2eError::check("company dropdown has no option with a non-empty value"))
		}
	}
}

/// Polls the current URL until it contains `fragment`.
///
/// Login submits asynchronously, so the redirect to the home page is
/// awaited with the same bounded-poll shape as the dropdown wait.
async fn wait_for_url_containing(
	session: &Session,
	fragment: &str,
	timeout: Duration,
	interval: Duration,
) -> Result<String> {
	let start = Instant::now();

	loop {
		let current = session.current_url().await?;
		if current.contains(fragment) {
			return Ok(current);
		}

		let elapsed = start.elapsed();
		if elapsed >= timeout {
			return Err(E2eError::check(format!(
				"timed out after {}ms waiting for url containing {fragment}; last url was {current}",
				timeout.as_millis()
			)));
		}

		tokio::time::sleep(interval.min(timeout - elapsed)).await;
	}
}

fn urls_match(current: &str, target: &str) -> bool {
	if current == target {
		return true;
	}

	let current_normalized = current.trim_end_matches('/');
	let target_normalized = target.trim_end_matches('/');

	current_normalized == target_normalized
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn scenario_names_are_unique_and_named() {
		let scenarios = all();
		let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();

		assert_eq!(names.len(), scenarios.len());
		assert!(scenarios.iter().all(|s| !s.name.is_empty()));
		assert!(scenarios.iter().all(|s| !s.description.is_empty()));
	}

	#[test]
	fn test_urls_match() {
		assert!(urls_match("https://example.com", "https://example.com"));
		assert!(urls_match("https://example.com/", "https://example.com"));
		assert!(urls_match("https://example.com", "https://example.com/"));
		assert!(urls_match("https://example.com/home/", "https://example.com/home"));

		assert!(!urls_match("https://example.com", "https://other.com"));
		assert!(!urls_match("https://example.com/a", "https://example.com/b"));
		assert!(!urls_match("https://example.com", "http://example.com"));
	}
}
