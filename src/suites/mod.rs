//! Runnable test cases. Each case arranges a page object or API wrapper,
//! acts, and asserts; a failing case is recorded and the suite moves on.

pub mod api;
pub mod login;

use crate::errors::DriverError;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CaseError {
    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

pub type CaseResult = std::result::Result<(), CaseError>;

/// Fail the case with `message` unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>) -> CaseResult {
    if condition {
        Ok(())
    } else {
        Err(CaseError::Assertion(message.into()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn new(suite: &str) -> Self {
        Self {
            suite: suite.to_string(),
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, result: CaseResult) {
        let outcome = match result {
            Ok(()) => {
                info!(suite = %self.suite, case = name, "passed");
                CaseOutcome {
                    name: name.to_string(),
                    passed: true,
                    detail: None,
                }
            }
            Err(e) => {
                warn!(suite = %self.suite, case = name, error = %e, "failed");
                CaseOutcome {
                    name: name.to_string(),
                    passed: false,
                    detail: Some(e.to_string()),
                }
            }
        };
        self.outcomes.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Lowercase, dash-separated form of a case name, used for artifact files
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
