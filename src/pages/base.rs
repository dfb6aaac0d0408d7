use crate::core::PageDriver;
use crate::errors::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

/// Uniform interaction vocabulary shared by every page object.
///
/// Holds a borrowed driver and nothing else that changes. Every method
/// forwards to the driver and returns its result untouched: no retries, no
/// implicit waits before `click`/`fill`, no error translation. Callers that
/// need synchronization call [`BasePage::wait_for_element`] first.
pub struct BasePage<'d, D: PageDriver + ?Sized> {
    driver: &'d D,
    screenshot_dir: PathBuf,
}

impl<'d, D: PageDriver + ?Sized> BasePage<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self {
            driver,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn driver(&self) -> &'d D {
        self.driver
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    pub async fn goto(&self, path: &str) -> Result<()> {
        debug!(path, "goto");
        self.driver.navigate(path).await
    }

    pub async fn goto_root(&self) -> Result<()> {
        self.goto("/").await
    }

    pub async fn wait_for_element(&self, selector: &str) -> Result<()> {
        debug!(selector, "wait_for_element");
        self.driver.wait_for_selector(selector).await
    }

    pub async fn wait_until_visible(&self, selector: &str) -> Result<()> {
        debug!(selector, "wait_until_visible");
        self.driver.wait_for_visible(selector).await
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        debug!(selector, "click");
        self.driver.click(selector).await
    }

    pub async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        // values may be credentials; log only their length
        debug!(selector, len = text.len(), "fill");
        self.driver.fill(selector, text).await
    }

    pub async fn get_text(&self, selector: &str) -> Result<Option<String>> {
        debug!(selector, "get_text");
        self.driver.text_content(selector).await
    }

    pub async fn is_visible(&self, selector: &str) -> Result<bool> {
        debug!(selector, "is_visible");
        self.driver.is_visible(selector).await
    }

    pub async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        debug!(selector, name, "get_attribute");
        self.driver.get_attribute(selector, name).await
    }

    /// Capture the viewport into `<screenshot_dir>/<name>.png`
    pub async fn take_screenshot(&self, name: &str) -> Result<PathBuf> {
        let path = self.screenshot_path(name);
        debug!(path = %path.display(), "take_screenshot");
        self.driver.screenshot(&path).await?;
        Ok(path)
    }

    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{}.png", name))
    }
}
