#![cfg(feature = "chrome")]

use browser_pages::core::Config;
use browser_pages::suites::login::run_suite;
use browser_pages::{ChromeDriver, LoginPage};

fn config() -> Config {
    Config::default().apply_env().unwrap()
}

#[tokio::test]
#[ignore = "requires Chrome and the application under test (BROWSER_PAGES_APP_URL)"]
async fn login_page_renders_in_chrome() {
    let config = config();
    let driver = ChromeDriver::launch(&config.browser, &config.app.base_url).unwrap();
    let page = LoginPage::new(&driver);

    page.goto().await.unwrap();
    page.base().wait_for_element(page.email_input()).await.unwrap();

    assert!(page.get_heading().await.unwrap().unwrap_or_default().contains("Login"));
    assert!(!page.is_error_displayed().await.unwrap());
}

#[tokio::test]
#[ignore = "requires Chrome and the application under test (BROWSER_PAGES_APP_URL)"]
async fn login_suite_passes_in_chrome() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();

    let report = run_suite(
        || ChromeDriver::launch(&config.browser, &config.app.base_url),
        Some(dir.path()),
    )
    .await;

    assert!(report.all_passed(), "{:#?}", report.outcomes);
}
