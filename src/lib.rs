pub mod api;
#[cfg(feature = "chrome")]
pub mod browser;
pub mod core;
pub mod errors;
pub mod pages;
pub mod suites;
pub mod testing;

#[cfg(feature = "chrome")]
pub use crate::browser::ChromeDriver;
pub use crate::core::{ApiResponse, Config, HttpClient, PageDriver};
pub use crate::errors::{DriverError, Result};
pub use crate::pages::{BasePage, DashboardPage, LoginPage};
