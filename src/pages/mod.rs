//! Page objects. Each screen owns its locators and composes [`BasePage`]
//! primitives into actions; tests never embed raw selectors.

pub mod base;
pub mod dashboard;
pub mod login;

pub use base::BasePage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn semantic_names_do_not_conflict_across_pages() {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for &(name, selector) in login::LOCATORS.iter().chain(dashboard::LOCATORS) {
            if let Some(existing) = seen.insert(name, selector) {
                assert_eq!(existing, selector, "locator {} claimed twice", name);
            }
        }
    }

    #[test]
    fn every_locator_is_a_parseable_css_selector() {
        for &(name, selector) in login::LOCATORS.iter().chain(dashboard::LOCATORS) {
            assert!(
                scraper::Selector::parse(selector).is_ok(),
                "{} has invalid selector {}",
                name,
                selector
            );
        }
    }
}
