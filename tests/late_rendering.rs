use async_trait::async_trait;
use browser_pages::pages::login;
use browser_pages::suites::login::{run_suite, LoginCase, VALID_EMAIL, VALID_PASSWORD};
use browser_pages::testing::{DriverCall, MockDriver};
use browser_pages::{DashboardPage, DriverError, LoginPage, PageDriver, Result};
use std::path::Path;
use std::sync::Mutex;

/// The mock login app, except that a click only takes effect once the caller
/// waits for something. Until then every read sees the page as it was before
/// the click, the way a real browser does while a redirect is in flight.
struct LateApp {
    inner: MockDriver,
    pending: Mutex<Option<String>>,
}

impl LateApp {
    fn new() -> Self {
        Self {
            inner: MockDriver::login_app(),
            pending: Mutex::new(None),
        }
    }

    async fn settle(&self) -> Result<()> {
        let pending = self.pending.lock().unwrap().take();
        match pending {
            Some(selector) => self.inner.click(&selector).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PageDriver for LateApp {
    async fn navigate(&self, path: &str) -> Result<()> {
        self.pending.lock().unwrap().take();
        self.inner.navigate(path).await
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        self.settle().await?;
        self.inner.wait_for_selector(selector).await
    }

    async fn wait_for_visible(&self, selector: &str) -> Result<()> {
        self.settle().await?;
        self.inner.wait_for_visible(selector).await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        // lookups run against whatever is rendered right now
        if !self.inner.is_visible(selector).await? {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        *self.pending.lock().unwrap() = Some(selector.to_string());
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.inner.fill(selector, text).await
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        self.inner.text_content(selector).await
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.inner.is_visible(selector).await
    }

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.inner.get_attribute(selector, name).await
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.inner.screenshot(path).await
    }

    async fn current_url(&self) -> Result<String> {
        self.inner.current_url().await
    }
}

#[tokio::test]
async fn reads_right_after_a_click_see_the_old_page() {
    let driver = LateApp::new();
    let page = LoginPage::new(&driver);
    page.goto().await.unwrap();
    page.login(VALID_EMAIL, VALID_PASSWORD).await.unwrap();

    assert!(driver.current_url().await.unwrap().ends_with(login::PATH));
    assert_eq!(DashboardPage::new(&driver).get_welcome_message().await.unwrap(), None);
}

#[tokio::test]
async fn suite_synchronizes_after_every_click() {
    let report = run_suite(|| Ok(LateApp::new()), None).await;

    assert_eq!(report.outcomes.len(), LoginCase::ALL.len());
    assert!(report.all_passed(), "{:#?}", report.outcomes);
}

#[tokio::test]
async fn valid_login_waits_for_the_dashboard_before_reading() {
    let driver = LateApp::new();
    LoginCase::ValidCredentials.run(&driver).await.unwrap();

    let calls = driver.inner.calls();
    let wait = calls
        .iter()
        .position(|c| matches!(c, DriverCall::WaitForSelector(_)))
        .expect("no wait after submitting");
    let read = calls
        .iter()
        .position(|c| matches!(c, DriverCall::TextContent(_)))
        .unwrap();
    assert!(wait < read);
}

#[tokio::test]
async fn error_cases_wait_for_the_error_region_to_show() {
    for case in [LoginCase::InvalidCredentials, LoginCase::RequiresEmail] {
        let driver = LateApp::new();
        case.run(&driver).await.unwrap();

        assert!(driver
            .inner
            .calls()
            .contains(&DriverCall::WaitForVisible(login::locators::ERROR_MESSAGE.into())));
    }
}
