use crate::core::{ApiResponse, HttpClient};
use crate::errors::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use url::Url;

const POST_COUNT: u64 = 100;
const USER_COUNT: u64 = 10;
const POSTS_PER_USER: u64 = 10;

/// In-memory copy of the JSONPlaceholder contract.
///
/// Writes are acknowledged but never persisted, like the real service: a
/// created post always gets id 101 and a deleted post can still be fetched.
#[derive(Debug, Default)]
pub struct FixtureServer {
    requests: Mutex<Vec<String>>,
}

impl FixtureServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far as `"METHOD url"`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, method: &str, url: &str) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(format!("{} {}", method, url));
        }
    }

    fn post_record(id: u64) -> Value {
        json!({
            "userId": (id - 1) / POSTS_PER_USER + 1,
            "id": id,
            "title": format!("post title {}", id),
            "body": format!("post body {}", id),
        })
    }

    fn user_record(id: u64) -> Value {
        json!({
            "id": id,
            "name": format!("User {}", id),
            "username": format!("user{}", id),
            "email": format!("user{}@example.com", id),
            "phone": "1-770-736-8031",
            "website": "example.org",
        })
    }

    fn parse_id(segment: &str, max: u64) -> Option<u64> {
        segment.parse::<u64>().ok().filter(|id| (1..=max).contains(id))
    }

    fn not_found() -> ApiResponse {
        ApiResponse::new(404).with_json(&json!({}))
    }

    fn route_get(url: &Url) -> ApiResponse {
        let segments: Vec<&str> = url.path().trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["posts"] => {
                let user_filter = url
                    .query_pairs()
                    .find(|(key, _)| key == "userId")
                    .and_then(|(_, value)| value.parse::<u64>().ok());
                let posts: Vec<Value> = (1..=POST_COUNT)
                    .map(Self::post_record)
                    .filter(|post| match user_filter {
                        Some(user_id) => post["userId"] == json!(user_id),
                        None => true,
                    })
                    .collect();
                ApiResponse::new(200).with_json(&Value::Array(posts))
            }
            ["posts", id] => match Self::parse_id(id, POST_COUNT) {
                Some(id) => ApiResponse::new(200).with_json(&Self::post_record(id)),
                None => Self::not_found(),
            },
            ["users", id] => match Self::parse_id(id, USER_COUNT) {
                Some(id) => ApiResponse::new(200).with_json(&Self::user_record(id)),
                None => Self::not_found(),
            },
            _ => Self::not_found(),
        }
    }

    fn merge(mut data: Value, id: u64) -> Value {
        if let Value::Object(ref mut fields) = data {
            fields.insert("id".to_string(), json!(id));
        }
        data
    }
}

#[async_trait]
impl HttpClient for FixtureServer {
    async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.record("GET", url);
        Ok(Self::route_get(&Url::parse(url)?))
    }

    async fn post(&self, url: &str, data: &Value) -> Result<ApiResponse> {
        self.record("POST", url);
        let parsed = Url::parse(url)?;
        if parsed.path().trim_matches('/') != "posts" {
            return Ok(Self::not_found());
        }
        Ok(ApiResponse::new(201).with_json(&Self::merge(data.clone(), POST_COUNT + 1)))
    }

    async fn put(&self, url: &str, data: &Value) -> Result<ApiResponse> {
        self.record("PUT", url);
        let parsed = Url::parse(url)?;
        let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["posts", id] => match Self::parse_id(id, POST_COUNT) {
                Some(id) => Ok(ApiResponse::new(200).with_json(&Self::merge(data.clone(), id))),
                // the real service fails updates of unknown posts with a server error
                None => Ok(ApiResponse::new(500).with_json(&json!({}))),
            },
            _ => Ok(Self::not_found()),
        }
    }

    async fn delete(&self, url: &str) -> Result<ApiResponse> {
        self.record("DELETE", url);
        let parsed = Url::parse(url)?;
        let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["posts", _] => Ok(ApiResponse::new(200).with_json(&json!({}))),
            _ => Ok(Self::not_found()),
        }
    }
}
