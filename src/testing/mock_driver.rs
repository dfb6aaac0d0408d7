use crate::core::PageDriver;
use crate::errors::{DriverError, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const MOCK_ORIGIN: &str = "http://app.test";

const BLANK_URL: &str = "about:blank";
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// One primitive call as seen by the driver, failed calls included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Navigate(String),
    WaitForSelector(String),
    WaitForVisible(String),
    Click(String),
    Fill(String, String),
    TextContent(String),
    IsVisible(String),
    GetAttribute(String, String),
    Screenshot(PathBuf),
    CurrentUrl,
}

type Reaction = Box<dyn Fn(&mut MockPage) + Send + Sync>;

/// Page state that click reactions may inspect and replace.
#[derive(Debug, Default)]
pub struct MockPage {
    path: Option<String>,
    html: String,
    values: HashMap<String, String>,
    routes: HashMap<String, String>,
}

impl MockPage {
    /// Value last filled into `selector`
    pub fn value(&self, selector: &str) -> Option<&str> {
        self.values.get(selector).map(String::as_str)
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Load a registered route, as a redirect would
    pub fn load(&mut self, path: &str) -> Result<()> {
        if let Some(html) = self.routes.get(path) {
            self.html = html.clone();
        } else if !self.routes.is_empty() {
            return Err(DriverError::NavigationFailed(format!(
                "{}{}: no such route",
                MOCK_ORIGIN, path
            )));
        }
        self.path = Some(path.to_string());
        self.values.clear();
        Ok(())
    }

    pub fn url(&self) -> String {
        match &self.path {
            Some(path) => format!("{}{}", MOCK_ORIGIN, path),
            None => BLANK_URL.to_string(),
        }
    }

    fn with_first<T>(
        &self,
        selector: &str,
        f: impl FnOnce(ElementRef<'_>) -> T,
    ) -> Result<Option<T>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| DriverError::InvalidSelector(format!("{}: {:?}", selector, e)))?;
        let document = Html::parse_document(&self.html);
        let found = document.select(&parsed).next().map(f);
        Ok(found)
    }

    fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.with_first(selector, |_| ())?.is_some())
    }
}

fn rendered(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .all(|el| {
            let attrs = el.value();
            let hidden_style = attrs
                .attr("style")
                .map(|style| {
                    let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
                    compact.contains("display:none") || compact.contains("visibility:hidden")
                })
                .unwrap_or(false);
            attrs.attr("hidden").is_none() && !hidden_style
        })
}

/// In-memory page driver over static HTML.
///
/// Selectors resolve with real CSS semantics. Every call is logged in order.
/// Waits resolve immediately: an element that is absent at call time times out.
/// Click reactions stand in for the application's server-side behavior.
pub struct MockDriver {
    page: Mutex<MockPage>,
    reactions: HashMap<String, Reaction>,
    calls: Mutex<Vec<DriverCall>>,
}

impl MockDriver {
    /// Driver with `html` already rendered and no routes: navigation keeps the content
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            page: Mutex::new(MockPage {
                html: html.into(),
                ..Default::default()
            }),
            reactions: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Blank driver whose content comes from registered routes
    pub fn blank() -> Self {
        Self::new("")
    }

    pub fn with_route(self, path: &str, html: impl Into<String>) -> Self {
        self.lock_page().routes.insert(path.to_string(), html.into());
        self
    }

    pub fn on_click<F>(mut self, selector: &str, reaction: F) -> Self
    where
        F: Fn(&mut MockPage) + Send + Sync + 'static,
    {
        self.reactions.insert(selector.to_string(), Box::new(reaction));
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    /// Value last filled into `selector` on the current page
    pub fn value(&self, selector: &str) -> Option<String> {
        self.lock_page().value(selector).map(str::to_string)
    }

    fn record(&self, call: DriverCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn lock_page(&self) -> std::sync::MutexGuard<'_, MockPage> {
        // a panicking reaction poisons the lock; the page itself is still usable
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn require(&self, page: &MockPage, selector: &str) -> Result<()> {
        if page.exists(selector)? {
            Ok(())
        } else {
            Err(DriverError::ElementNotFound(selector.to_string()))
        }
    }

    fn click_now(&self, selector: &str) -> Result<()> {
        let mut page = self.lock_page();
        self.require(&page, selector)?;
        if let Some(reaction) = self.reactions.get(selector) {
            reaction(&mut *page);
        }
        Ok(())
    }

    fn fill_now(&self, selector: &str, text: &str) -> Result<()> {
        let mut page = self.lock_page();
        self.require(&page, selector)?;
        page.values.insert(selector.to_string(), text.to_string());
        Ok(())
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&self, path: &str) -> Result<()> {
        self.record(DriverCall::Navigate(path.to_string()));
        self.lock_page().load(path)
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        self.record(DriverCall::WaitForSelector(selector.to_string()));
        if self.lock_page().exists(selector)? {
            Ok(())
        } else {
            Err(DriverError::Timeout(selector.to_string()))
        }
    }

    async fn wait_for_visible(&self, selector: &str) -> Result<()> {
        self.record(DriverCall::WaitForVisible(selector.to_string()));
        let shown = self
            .lock_page()
            .with_first(selector, rendered)?
            .unwrap_or(false);
        if shown {
            Ok(())
        } else {
            Err(DriverError::Timeout(selector.to_string()))
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(DriverCall::Click(selector.to_string()));
        self.click_now(selector)
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.record(DriverCall::Fill(selector.to_string(), text.to_string()));
        self.fill_now(selector, text)
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        self.record(DriverCall::TextContent(selector.to_string()));
        self.lock_page()
            .with_first(selector, |el| el.text().collect::<String>())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.record(DriverCall::IsVisible(selector.to_string()));
        Ok(self
            .lock_page()
            .with_first(selector, rendered)?
            .unwrap_or(false))
    }

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.record(DriverCall::GetAttribute(
            selector.to_string(),
            name.to_string(),
        ));
        Ok(self
            .lock_page()
            .with_first(selector, |el| el.value().attr(name).map(str::to_string))?
            .flatten())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.record(DriverCall::Screenshot(path.to_path_buf()));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, PNG_SIGNATURE).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.record(DriverCall::CurrentUrl);
        Ok(self.lock_page().url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attribute_selectors_with_quotes_resolve() {
        let driver = MockDriver::new(r#"<input name="email" required>"#);

        assert_eq!(
            driver
                .get_attribute(r#"input[name="email"]"#, "required")
                .await
                .unwrap(),
            Some(String::new())
        );
        assert_eq!(
            driver.get_attribute(r#"input[name="email"]"#, "placeholder").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn hidden_ancestors_hide_children() {
        let driver = MockDriver::new(
            r#"<div style="display: none"><p id="inner">x</p></div><p id="shown">y</p>"#,
        );

        assert!(!driver.is_visible("#inner").await.unwrap());
        assert!(driver.is_visible("#shown").await.unwrap());
    }

    #[tokio::test]
    async fn invalid_selector_is_an_error_not_absence() {
        let driver = MockDriver::new("<p></p>");
        let err = driver.is_visible("p[").await.unwrap_err();
        assert!(matches!(err, DriverError::InvalidSelector(_)));
    }

    #[tokio::test]
    async fn unknown_route_fails_navigation() {
        let driver = MockDriver::blank().with_route("/login", "<h1>Login</h1>");

        assert!(driver.navigate("/login").await.is_ok());
        assert_eq!(driver.current_url().await.unwrap(), "http://app.test/login");

        let err = driver.navigate("/nowhere").await.unwrap_err();
        assert!(matches!(err, DriverError::NavigationFailed(_)));
    }

    #[tokio::test]
    async fn visibility_wait_ignores_hidden_matches() {
        let driver = MockDriver::new(r#"<div id="err" hidden>x</div><p>y</p>"#);

        assert!(driver.wait_for_visible("p").await.is_ok());
        assert!(matches!(
            driver.wait_for_visible("#err").await,
            Err(DriverError::Timeout(_))
        ));
        assert!(matches!(
            driver.wait_for_visible("#missing").await,
            Err(DriverError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn wait_times_out_for_absent_element() {
        let driver = MockDriver::new("<p></p>");
        assert!(driver.wait_for_selector("p").await.is_ok());
        assert!(matches!(
            driver.wait_for_selector("#late").await,
            Err(DriverError::Timeout(_))
        ));
    }
}
