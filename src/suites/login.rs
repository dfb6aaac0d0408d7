use super::{ensure, slug, CaseResult, SuiteReport};
use crate::core::PageDriver;
use crate::errors::Result;
use crate::pages::{BasePage, DashboardPage, LoginPage};
use std::path::Path;
use tracing::warn;

pub const VALID_EMAIL: &str = "user@example.com";
pub const VALID_PASSWORD: &str = "password123";
pub const INVALID_EMAIL: &str = "invalid@email.com";
pub const INVALID_PASSWORD: &str = "wrongpass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginCase {
    DisplaysForm,
    ValidCredentials,
    InvalidCredentials,
    RequiresEmail,
    EmailMarkedRequired,
    Logout,
}

impl LoginCase {
    pub const ALL: [LoginCase; 6] = [
        LoginCase::DisplaysForm,
        LoginCase::ValidCredentials,
        LoginCase::InvalidCredentials,
        LoginCase::RequiresEmail,
        LoginCase::EmailMarkedRequired,
        LoginCase::Logout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LoginCase::DisplaysForm => "should display login form",
            LoginCase::ValidCredentials => "should login successfully with valid credentials",
            LoginCase::InvalidCredentials => "should show error message with invalid credentials",
            LoginCase::RequiresEmail => "should require email field",
            LoginCase::EmailMarkedRequired => "should have proper accessibility attributes",
            LoginCase::Logout => "should logout successfully",
        }
    }

    /// Run the case on `driver`. Every read that follows a click first waits
    /// for the state the click should produce, since drivers never wait on
    /// their own.
    pub async fn run<D: PageDriver + ?Sized>(self, driver: &D) -> CaseResult {
        let login = LoginPage::new(driver);
        login.goto().await?;

        match self {
            LoginCase::DisplaysForm => {
                let heading = login.get_heading().await?.unwrap_or_default();
                ensure(
                    heading.contains("Login"),
                    format!("heading {:?} does not contain \"Login\"", heading),
                )
            }
            LoginCase::ValidCredentials => {
                login.login(VALID_EMAIL, VALID_PASSWORD).await?;
                let dashboard = DashboardPage::new(driver);
                dashboard.base().wait_for_element(dashboard.welcome_message()).await?;
                let welcome = dashboard.get_welcome_message().await?.unwrap_or_default();
                ensure(
                    welcome.contains("Welcome"),
                    format!("welcome message {:?} does not contain \"Welcome\"", welcome),
                )
            }
            LoginCase::InvalidCredentials => {
                login.login(INVALID_EMAIL, INVALID_PASSWORD).await?;
                // the error region is in the markup from the start, only hidden
                login.base().wait_until_visible(login.error_message()).await?;
                ensure(
                    login.is_error_displayed().await?,
                    "error message is not visible",
                )
            }
            LoginCase::RequiresEmail => {
                login.fill_password(VALID_PASSWORD).await?;
                login.submit().await?;
                login.base().wait_until_visible(login.error_message()).await?;
                ensure(
                    login.is_error_displayed().await?,
                    "error message is not visible",
                )
            }
            LoginCase::EmailMarkedRequired => ensure(
                login.is_email_required().await?,
                "email input lacks the required attribute",
            ),
            LoginCase::Logout => {
                login.login(VALID_EMAIL, VALID_PASSWORD).await?;
                let dashboard = DashboardPage::new(driver);
                dashboard.base().wait_for_element(dashboard.logout_button()).await?;
                dashboard.logout().await?;
                login.base().wait_for_element(login.email_input()).await?;
                let url = driver.current_url().await?;
                ensure(
                    url.contains("/login"),
                    format!("url {:?} does not contain \"/login\"", url),
                )
            }
        }
    }
}

/// Run every login case, each on a fresh driver from `make_driver`.
///
/// With `screenshot_dir` set, a failing case leaves `<dir>/<case-slug>.png`
/// behind.
pub async fn run_suite<D, F>(make_driver: F, screenshot_dir: Option<&Path>) -> SuiteReport
where
    D: PageDriver,
    F: Fn() -> Result<D>,
{
    let mut report = SuiteReport::new("login");

    for case in LoginCase::ALL {
        let driver = match make_driver() {
            Ok(driver) => driver,
            Err(e) => {
                report.record(case.name(), Err(e.into()));
                continue;
            }
        };

        let result = case.run(&driver).await;

        if let (Err(_), Some(dir)) = (&result, screenshot_dir) {
            let page = BasePage::new(&driver).with_screenshot_dir(dir);
            if let Err(e) = page.take_screenshot(&slug(case.name())).await {
                warn!(case = case.name(), error = %e, "failure screenshot not captured");
            }
        }

        report.record(case.name(), result);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDriver;

    #[tokio::test]
    async fn every_case_passes_against_the_mock_application() {
        let report = run_suite(|| Ok(MockDriver::login_app()), None).await;

        assert_eq!(report.outcomes.len(), LoginCase::ALL.len());
        assert!(report.all_passed(), "{:#?}", report.outcomes);
    }

    #[tokio::test]
    async fn broken_page_fails_cases_and_captures_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_suite(|| Ok(MockDriver::new("<h1>Maintenance</h1>")), Some(dir.path())).await;

        assert!(!report.all_passed());
        let form = report.outcome(LoginCase::DisplaysForm.name()).unwrap();
        assert!(!form.passed);
        assert!(dir
            .path()
            .join("should-display-login-form.png")
            .exists());
    }
}
