use super::base::BasePage;
use crate::core::PageDriver;
use crate::errors::Result;
use std::path::PathBuf;

pub const PATH: &str = "/login";

pub mod locators {
    pub const EMAIL_INPUT: &str = r#"input[name="email"]"#;
    pub const PASSWORD_INPUT: &str = r#"input[name="password"]"#;
    pub const LOGIN_BUTTON: &str = r#"button[type="submit"]"#;
    pub const ERROR_MESSAGE: &str = r#"[data-testid="error-message"]"#;
    pub const SUCCESS_MESSAGE: &str = r#"[data-testid="success-message"]"#;
    pub const HEADING: &str = "h1";
}

/// Every named element on the login screen
pub const LOCATORS: &[(&str, &str)] = &[
    ("email_input", locators::EMAIL_INPUT),
    ("password_input", locators::PASSWORD_INPUT),
    ("login_button", locators::LOGIN_BUTTON),
    ("error_message", locators::ERROR_MESSAGE),
    ("success_message", locators::SUCCESS_MESSAGE),
    ("heading", locators::HEADING),
];

/// Login screen: credentials form plus its message regions.
pub struct LoginPage<'d, D: PageDriver + ?Sized> {
    base: BasePage<'d, D>,
}

impl<'d, D: PageDriver + ?Sized> LoginPage<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self {
            base: BasePage::new(driver),
        }
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base = self.base.with_screenshot_dir(dir);
        self
    }

    pub fn base(&self) -> &BasePage<'d, D> {
        &self.base
    }

    // Locators

    pub const fn email_input(&self) -> &'static str {
        locators::EMAIL_INPUT
    }

    pub const fn password_input(&self) -> &'static str {
        locators::PASSWORD_INPUT
    }

    pub const fn login_button(&self) -> &'static str {
        locators::LOGIN_BUTTON
    }

    pub const fn error_message(&self) -> &'static str {
        locators::ERROR_MESSAGE
    }

    pub const fn success_message(&self) -> &'static str {
        locators::SUCCESS_MESSAGE
    }

    pub const fn heading(&self) -> &'static str {
        locators::HEADING
    }

    // Actions

    pub async fn goto(&self) -> Result<()> {
        self.base.goto(PATH).await
    }

    /// Fill email, fill password, click submit. No waits between steps and
    /// no check that the login took effect.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.base.fill(self.email_input(), email).await?;
        self.base.fill(self.password_input(), password).await?;
        self.base.click(self.login_button()).await
    }

    pub async fn fill_password(&self, password: &str) -> Result<()> {
        self.base.fill(self.password_input(), password).await
    }

    pub async fn submit(&self) -> Result<()> {
        self.base.click(self.login_button()).await
    }

    pub async fn get_error_message(&self) -> Result<Option<String>> {
        self.base.get_text(self.error_message()).await
    }

    pub async fn get_success_message(&self) -> Result<Option<String>> {
        self.base.get_text(self.success_message()).await
    }

    pub async fn get_heading(&self) -> Result<Option<String>> {
        self.base.get_text(self.heading()).await
    }

    pub async fn is_error_displayed(&self) -> Result<bool> {
        self.base.is_visible(self.error_message()).await
    }

    pub async fn is_email_required(&self) -> Result<bool> {
        Ok(self
            .base
            .get_attribute(self.email_input(), "required")
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DriverCall, MockDriver};

    #[test]
    fn locators_are_stable() {
        let driver = MockDriver::new("");
        let page = LoginPage::new(&driver);

        assert_eq!(page.email_input(), page.email_input());
        assert_eq!(page.email_input(), r#"input[name="email"]"#);
        assert_eq!(page.login_button(), r#"button[type="submit"]"#);
        assert_eq!(LOCATORS.len(), 6);
    }

    #[tokio::test]
    async fn login_fills_then_submits_in_fixed_order() {
        for (email, password) in [("user@example.com", "password123"), ("", ""), ("a", "b c")] {
            let driver = MockDriver::login_app();
            let page = LoginPage::new(&driver);
            page.goto().await.unwrap();
            driver.clear_calls();

            page.login(email, password).await.unwrap();

            assert_eq!(
                driver.calls(),
                vec![
                    DriverCall::Fill(locators::EMAIL_INPUT.into(), email.into()),
                    DriverCall::Fill(locators::PASSWORD_INPUT.into(), password.into()),
                    DriverCall::Click(locators::LOGIN_BUTTON.into()),
                ]
            );
        }
    }

    #[tokio::test]
    async fn login_stops_at_first_failing_step() {
        let driver = MockDriver::new("<form><input name='password'></form>");
        let page = LoginPage::new(&driver);

        assert!(page.login("user@example.com", "pw").await.is_err());
        assert_eq!(driver.calls().len(), 1);
    }

    #[tokio::test]
    async fn error_check_is_false_when_region_missing() {
        let driver = MockDriver::new("<h1>Login</h1>");
        let page = LoginPage::new(&driver);

        assert!(!page.is_error_displayed().await.unwrap());
        assert_eq!(page.get_error_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn required_attribute_is_detected() {
        let driver = MockDriver::login_app();
        let page = LoginPage::new(&driver);
        page.goto().await.unwrap();

        assert!(page.is_email_required().await.unwrap());
    }
}
