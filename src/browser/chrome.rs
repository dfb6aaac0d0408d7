use crate::core::{BrowserConfig, PageDriver};
use crate::errors::{DriverError, Result};
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::Selector;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use super::scripts;

const VISIBILITY_POLL: Duration = Duration::from_millis(100);

/// Chrome-backed page driver. One instance owns one browser and one tab, so
/// independent flows each launch their own.
pub struct ChromeDriver {
    // kept alive for the lifetime of the tab
    _browser: Browser,
    tab: Arc<Tab>,
    base_url: Url,
    element_timeout: Duration,
    navigation_timeout: Duration,
}

impl ChromeDriver {
    pub fn launch(config: &BrowserConfig, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;

        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );

        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        for arg in &config.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| DriverError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| DriverError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| DriverError::LaunchFailed(e.to_string()))?;

        let element_timeout = Duration::from_millis(config.element_timeout_ms);
        tab.set_default_timeout(element_timeout);

        debug!(base_url = %base_url, headless = config.headless, "chrome launched");

        Ok(Self {
            _browser: browser,
            tab,
            base_url,
            element_timeout,
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
        })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Run a blocking headless_chrome call off the async workers, so parallel
    /// flows on one runtime do not stall each other.
    async fn on_tab<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Tab) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tab = Arc::clone(&self.tab);
        tokio::task::spawn_blocking(move || f(&tab))
            .await
            .map_err(|e| DriverError::AnyhowError(format!("browser task failed: {}", e)))?
    }

    async fn evaluate(&self, script: String) -> Result<Value> {
        self.on_tab(move |tab| {
            let result = tab
                .evaluate(&script, false)
                .map_err(|e| DriverError::JavaScriptFailed(e.to_string()))?;
            Ok(result.value.unwrap_or(Value::Null))
        })
        .await
    }
}

/// `Some(InvalidSelector)` when `selector` is not valid CSS. Chrome reports
/// bad selectors as generic lookup failures, so they are told apart here.
fn selector_error(selector: &str) -> Option<DriverError> {
    Selector::parse(selector)
        .err()
        .map(|e| DriverError::InvalidSelector(format!("{}: {:?}", selector, e)))
}

fn find_error(selector: &str) -> DriverError {
    selector_error(selector).unwrap_or_else(|| DriverError::ElementNotFound(selector.to_string()))
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&self, path: &str) -> Result<()> {
        let url = self.resolve(path)?;
        let navigation_timeout = self.navigation_timeout;
        let element_timeout = self.element_timeout;

        self.on_tab(move |tab| {
            tab.set_default_timeout(navigation_timeout);
            let outcome = tab
                .navigate_to(url.as_str())
                .and_then(|tab| tab.wait_until_navigated())
                .map(|_| ())
                .map_err(|e| DriverError::NavigationFailed(format!("{}: {}", url, e)));
            tab.set_default_timeout(element_timeout);
            outcome
        })
        .await
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        let selector = selector.to_string();
        self.on_tab(move |tab| {
            tab.wait_for_element(&selector).map(|_| ()).map_err(|e| {
                selector_error(&selector)
                    .unwrap_or_else(|| DriverError::Timeout(format!("{}: {}", selector, e)))
            })
        })
        .await
    }

    async fn wait_for_visible(&self, selector: &str) -> Result<()> {
        if let Some(err) = selector_error(selector) {
            return Err(err);
        }

        let deadline = Instant::now() + self.element_timeout;
        loop {
            if self.is_visible(selector).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout(format!("{} (not visible)", selector)));
            }
            tokio::time::sleep(VISIBILITY_POLL).await;
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let selector = selector.to_string();
        self.on_tab(move |tab| {
            let element = tab.find_element(&selector).map_err(|_| find_error(&selector))?;
            element.click()?;
            Ok(())
        })
        .await
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let selector = selector.to_string();
        let text = text.to_string();
        self.on_tab(move |tab| {
            let element = tab.find_element(&selector).map_err(|_| find_error(&selector))?;
            element
                .call_js_fn(scripts::CLEAR_VALUE, vec![], false)
                .map_err(|e| DriverError::JavaScriptFailed(e.to_string()))?;
            element.type_into(&text)?;
            Ok(())
        })
        .await
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        let value = self.evaluate(scripts::text_content(selector)).await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let value = self.evaluate(scripts::is_visible(selector)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let value = self.evaluate(scripts::get_attribute(selector, name)).await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        let png = self
            .on_tab(|tab| {
                tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
                    .map_err(|e| DriverError::ScreenshotFailed(e.to_string()))
            })
            .await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.on_tab(|tab| Ok(tab.get_url())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_selectors_are_reported_as_invalid() {
        assert!(matches!(
            selector_error("input[name="),
            Some(DriverError::InvalidSelector(_))
        ));
        assert!(matches!(find_error("p["), DriverError::InvalidSelector(_)));
    }

    #[test]
    fn well_formed_selectors_fall_through_to_lookup_errors() {
        assert!(selector_error(r#"[data-testid="error-message"]"#).is_none());
        assert!(matches!(find_error("#missing"), DriverError::ElementNotFound(_)));
    }
}
