use crate::errors::{DriverError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw response handed back to tests. Status codes are data, not errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are lowercased
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_json(mut self, value: &Value) -> Self {
        self.body = serde_json::to_vec(value).unwrap_or_default();
        self.with_header("content-type", "application/json; charset=utf-8")
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decode the body into a typed record. Missing required fields surface
    /// as `InvalidPayload` so tests see which resource was malformed.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            DriverError::InvalidPayload(format!(
                "{} (status {}): {}",
                std::any::type_name::<T>(),
                self.status,
                e
            ))
        })
    }

    pub fn json_value(&self) -> Result<Value> {
        self.json::<Value>()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP verbs used by the API suites
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<ApiResponse>;

    async fn post(&self, url: &str, data: &Value) -> Result<ApiResponse>;

    async fn put(&self, url: &str, data: &Value) -> Result<ApiResponse>;

    async fn delete(&self, url: &str) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = ApiResponse::new(200).with_header("Content-Type", "application/json");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn json_reports_missing_fields_as_invalid_payload() {
        let response = ApiResponse::new(200).with_json(&json!({ "other": 1 }));
        let err = response.json::<Named>().unwrap_err();
        assert!(matches!(err, DriverError::InvalidPayload(_)));

        let ok = ApiResponse::new(200).with_json(&json!({ "name": "Leanne" }));
        assert_eq!(ok.json::<Named>().unwrap().name, "Leanne");
    }

    #[test]
    fn error_statuses_are_plain_data() {
        let response = ApiResponse::new(404).with_json(&json!({}));
        assert_eq!(response.status(), 404);
        assert!(!response.is_success());
    }
}
