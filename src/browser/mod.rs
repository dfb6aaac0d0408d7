pub mod chrome;
pub mod scripts;

pub use chrome::ChromeDriver;
