use super::models::{NewPost, Post};
use crate::core::{ApiResponse, HttpClient};
use crate::errors::Result;
use url::Url;

/// Typed routes of the JSONPlaceholder fixture API.
///
/// Every call returns the raw response. Callers decide what a status means;
/// a 404 is data here, not an error.
pub struct PostsApi<'c, C: HttpClient + ?Sized> {
    client: &'c C,
    base_url: Url,
}

impl<'c, C: HttpClient + ?Sized> PostsApi<'c, C> {
    pub fn new(client: &'c C, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn list_posts(&self) -> Result<ApiResponse> {
        self.client.get(self.url("posts")?.as_str()).await
    }

    pub async fn get_post(&self, id: u64) -> Result<ApiResponse> {
        self.client
            .get(self.url(&format!("posts/{}", id))?.as_str())
            .await
    }

    pub async fn posts_by_user(&self, user_id: u64) -> Result<ApiResponse> {
        let mut url = self.url("posts")?;
        url.query_pairs_mut()
            .append_pair("userId", &user_id.to_string());
        self.client.get(url.as_str()).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<ApiResponse> {
        let data = serde_json::to_value(post)?;
        self.client.post(self.url("posts")?.as_str(), &data).await
    }

    pub async fn update_post(&self, post: &Post) -> Result<ApiResponse> {
        let data = serde_json::to_value(post)?;
        self.client
            .put(self.url(&format!("posts/{}", post.id))?.as_str(), &data)
            .await
    }

    pub async fn delete_post(&self, id: u64) -> Result<ApiResponse> {
        self.client
            .delete(self.url(&format!("posts/{}", id))?.as_str())
            .await
    }

    pub async fn get_user(&self, id: u64) -> Result<ApiResponse> {
        self.client
            .get(self.url(&format!("users/{}", id))?.as_str())
            .await
    }
}
