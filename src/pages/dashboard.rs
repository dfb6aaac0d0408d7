use super::base::BasePage;
use crate::core::PageDriver;
use crate::errors::Result;
use std::path::PathBuf;

pub const PATH: &str = "/dashboard";

pub mod locators {
    pub const WELCOME_MESSAGE: &str = r#"[data-testid="welcome-title"]"#;
    pub const LOGOUT_BUTTON: &str = r#"[data-testid="logout-btn"]"#;
    pub const USER_MENU: &str = r#"[data-testid="user-menu"]"#;
    pub const PROFILE_LINK: &str = r#"[data-testid="profile-link"]"#;
}

pub const LOCATORS: &[(&str, &str)] = &[
    ("welcome_message", locators::WELCOME_MESSAGE),
    ("logout_button", locators::LOGOUT_BUTTON),
    ("user_menu", locators::USER_MENU),
    ("profile_link", locators::PROFILE_LINK),
];

pub struct DashboardPage<'d, D: PageDriver + ?Sized> {
    base: BasePage<'d, D>,
}

impl<'d, D: PageDriver + ?Sized> DashboardPage<'d, D> {
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

    pub const fn welcome_message(&self) -> &'static str {
        locators::WELCOME_MESSAGE
    }

    pub const fn logout_button(&self) -> &'static str {
        locators::LOGOUT_BUTTON
    }

    pub const fn user_menu(&self) -> &'static str {
        locators::USER_MENU
    }

    pub const fn profile_link(&self) -> &'static str {
        locators::PROFILE_LINK
    }

    pub async fn goto(&self) -> Result<()> {
        self.base.goto(PATH).await
    }

    pub async fn get_welcome_message(&self) -> Result<Option<String>> {
        self.base.get_text(self.welcome_message()).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.base.click(self.logout_button()).await
    }

    pub async fn open_user_menu(&self) -> Result<()> {
        self.base.click(self.user_menu()).await
    }

    pub async fn navigate_to_profile(&self) -> Result<()> {
        self.base.click(self.profile_link()).await
    }

    pub async fn is_logout_button_visible(&self) -> Result<bool> {
        self.base.is_visible(self.logout_button()).await
    }
}
