use crate::errors::Result;
use async_trait::async_trait;
use std::path::Path;

/// Primitive browser operations that page objects are built from.
///
/// Implementations own all timing policy: how long `wait_for_selector` waits,
/// and whether navigation waits for the load event. Callers never pass
/// timeouts through this interface.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to `path`, resolved against the driver's base URL
    async fn navigate(&self, path: &str) -> Result<()>;

    /// Suspend until an element matching `selector` is present
    async fn wait_for_selector(&self, selector: &str) -> Result<()>;

    /// Suspend until the first match for `selector` is rendered visibly.
    /// Covers regions that exist hidden in the markup before they are shown.
    async fn wait_for_visible(&self, selector: &str) -> Result<()>;

    /// Click the first element matching `selector`. Fails if it is absent.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Replace the value of the input matching `selector` with `text`
    async fn fill(&self, selector: &str, text: &str) -> Result<()>;

    /// Text content of the first match, `None` when nothing matches
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;

    /// Visibility of the first match. Absence reports `false`, never an error.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Attribute value of the first match, `None` when the element or attribute is missing
    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Capture the current viewport as PNG into `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// URL currently loaded
    async fn current_url(&self) -> Result<String>;
}
