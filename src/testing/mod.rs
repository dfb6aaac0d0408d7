//! In-memory stand-ins for the browser and the fixture API, so page objects
//! and suites run without Chrome or network access.

pub mod fixture_api;
pub mod login_app;
pub mod mock_driver;

pub use fixture_api::FixtureServer;
pub use mock_driver::{DriverCall, MockDriver, MockPage, MOCK_ORIGIN};
