//! Login page: credential fields, the company dropdown, and the submit
//! button.

use myrent_harness::{Session, SuiteConfig};
use myrent_ui::{Dropdown, Selection};
use thirtyfour::By;
use tracing::{debug, info};

use crate::error::Result;

pub struct LoginPage<'s> {
	session: &'s Session,
}

impl<'s> LoginPage<'s> {
	pub fn new(session: &'s Session) -> Self {
		Self { session }
	}

	fn username_field() -> By {
		By::Id("j_username")
	}

	fn password_field() -> By {
		By::Id("j_password")
	}

	fn company_field() -> By {
		By::Id("company")
	}

	fn submit_button() -> By {
		By::Css("button[type='submit']")
	}

	/// Controls that must be visible on a loaded login page.
	pub fn required_controls() -> [(&'static str, By); 4] {
		[
			("username", Self::username_field()),
			("password", Self::password_field()),
			("company", Self::company_field()),
			("submit", Self::submit_button()),
		]
	}

	/// Navigates to the login page.
	pub async fn open(&self, login_url: &str) -> Result<()> {
		info!(target: "myrent.pages", url = %login_url, "open login page");
		self.session.goto(login_url).await?;
		Ok(())
	}

	/// Company dropdown handle with the suite's wait policy applied.
	pub fn company_dropdown(&self, config: &SuiteConfig) -> Dropdown<'_> {
		Dropdown::new(self.session.driver(), Self::company_field())
			.with_label("company")
			.with_timeout(config.populate_timeout())
			.with_poll_interval(config.poll_interval())
	}

	/// Fills credentials, selects the company code (fallback policy
	/// applies), and submits the form.
	pub async fn login(&self, config: &SuiteConfig) -> Result<Selection> {
		let driver = self.session.driver();

		driver
			.find(Self::username_field())
			.await?
			.send_keys(config.username.as_str())
			.await?;
		driver
			.find(Self::password_field())
			.await?
			.send_keys(config.password.as_str())
			.await?;

		let selection = self
			.company_dropdown(config)
			.select_value_or_first(&config.company)
			.await?;

		driver.find(Self::submit_button()).await?.click().await?;
		Ok(selection)
	}

	/// Names of required controls that are absent or not displayed.
	pub async fn missing_controls(&self) -> Result<Vec<&'static str>> {
		let mut missing = Vec::new();
		for (name, locator) in Self::required_controls() {
			let displayed = match self.session.driver().find(locator).await {
				Ok(element) => element.is_displayed().await?,
				Err(err) => {
					debug!(target: "myrent.pages", control = name, error = %err, "control not found");
					false
				}
			};
			if !displayed {
				missing.push(name);
			}
		}
		Ok(missing)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn required_controls_cover_the_login_form() {
		let names: Vec<_> = LoginPage::required_controls()
			.iter()
			.map(|(name, _)| *name)
			.collect();
		assert_eq!(names, vec!["username", "password", "company", "submit"]);
	}
}
