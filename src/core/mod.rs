pub mod config;
pub mod driver;
pub mod http;

pub use config::{ApiConfig, AppConfig, BrowserConfig, Config, Viewport};
pub use driver::PageDriver;
pub use http::{ApiResponse, HttpClient};
