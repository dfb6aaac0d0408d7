use super::{ensure, CaseResult, SuiteReport};
use crate::api::{NewPost, Post, PostsApi, User};
use crate::core::HttpClient;
use crate::errors::Result;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCase {
    ListPosts,
    GetPost,
    MissingPost,
    CreatePost,
    UpdatePost,
    DeletePost,
    GetUser,
    ContentTypeHeader,
    FilterByUser,
}

impl ApiCase {
    pub const ALL: [ApiCase; 9] = [
        ApiCase::ListPosts,
        ApiCase::GetPost,
        ApiCase::MissingPost,
        ApiCase::CreatePost,
        ApiCase::UpdatePost,
        ApiCase::DeletePost,
        ApiCase::GetUser,
        ApiCase::ContentTypeHeader,
        ApiCase::FilterByUser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ApiCase::ListPosts => "should fetch all posts successfully",
            ApiCase::GetPost => "should fetch a single post by ID",
            ApiCase::MissingPost => "should return 404 for non-existent post",
            ApiCase::CreatePost => "should create a new post",
            ApiCase::UpdatePost => "should update an existing post",
            ApiCase::DeletePost => "should delete a post",
            ApiCase::GetUser => "should fetch user by ID",
            ApiCase::ContentTypeHeader => "should validate response headers",
            ApiCase::FilterByUser => "should handle request with query parameters",
        }
    }

    pub async fn run<C: HttpClient + ?Sized>(self, api: &PostsApi<'_, C>) -> CaseResult {
        match self {
            ApiCase::ListPosts => {
                let response = api.list_posts().await?;
                expect_status(response.status(), 200)?;
                let posts: Vec<Post> = response.json()?;
                ensure(!posts.is_empty(), "post list is empty")
            }
            ApiCase::GetPost => {
                let response = api.get_post(1).await?;
                expect_status(response.status(), 200)?;
                // Post requires id, title, body and userId to decode
                let post: Post = response.json()?;
                ensure(post.id == 1, format!("expected id 1, got {}", post.id))
            }
            ApiCase::MissingPost => {
                let response = api.get_post(99999).await?;
                expect_status(response.status(), 404)
            }
            ApiCase::CreatePost => {
                let draft = NewPost::new("Test Post", "This is a test post", 1);
                let response = api.create_post(&draft).await?;
                expect_status(response.status(), 201)?;
                let created: Value = response.json_value()?;
                ensure(
                    created["title"] == "Test Post",
                    format!("unexpected title {}", created["title"]),
                )?;
                ensure(created.get("id").is_some(), "created post has no id")
            }
            ApiCase::UpdatePost => {
                let post = NewPost::new("Updated Title", "Updated body content", 1).with_id(1);
                let response = api.update_post(&post).await?;
                expect_status(response.status(), 200)?;
                let updated: Post = response.json()?;
                ensure(
                    updated.title == "Updated Title",
                    format!("unexpected title {:?}", updated.title),
                )
            }
            ApiCase::DeletePost => {
                // the fixture API does not persist deletes, so no follow-up GET
                let response = api.delete_post(1).await?;
                expect_status(response.status(), 200)
            }
            ApiCase::GetUser => {
                let response = api.get_user(1).await?;
                expect_status(response.status(), 200)?;
                let user: User = response.json()?;
                ensure(user.id == 1, format!("expected id 1, got {}", user.id))
            }
            ApiCase::ContentTypeHeader => {
                let response = api.list_posts().await?;
                let content_type = response.header("content-type").unwrap_or_default();
                ensure(
                    content_type.contains("application/json"),
                    format!("content-type was {:?}", content_type),
                )
            }
            ApiCase::FilterByUser => {
                let response = api.posts_by_user(1).await?;
                expect_status(response.status(), 200)?;
                let posts: Vec<Post> = response.json()?;
                ensure(
                    posts.iter().all(|post| post.user_id == 1),
                    "a post from another user was returned",
                )
            }
        }
    }
}

fn expect_status(actual: u16, expected: u16) -> CaseResult {
    ensure(
        actual == expected,
        format!("expected status {}, got {}", expected, actual),
    )
}

/// Run every API case against `base_url` through `client`
pub async fn run_suite<C: HttpClient + ?Sized>(client: &C, base_url: &str) -> Result<SuiteReport> {
    let api = PostsApi::new(client, base_url)?;
    let mut report = SuiteReport::new("api");

    for case in ApiCase::ALL {
        let result = case.run(&api).await;
        report.record(case.name(), result);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiResponse;
    use crate::testing::FixtureServer;
    use async_trait::async_trait;

    const BASE: &str = "https://jsonplaceholder.typicode.com";

    #[tokio::test]
    async fn every_case_passes_against_the_fixture() {
        let server = FixtureServer::new();
        let report = run_suite(&server, BASE).await.unwrap();

        assert_eq!(report.outcomes.len(), ApiCase::ALL.len());
        assert!(report.all_passed(), "{:#?}", report.outcomes);
    }

    /// Answers every request with the same canned response
    struct Canned(ApiResponse);

    #[async_trait]
    impl HttpClient for Canned {
        async fn get(&self, _url: &str) -> Result<ApiResponse> {
            Ok(self.0.clone())
        }
        async fn post(&self, _url: &str, _data: &Value) -> Result<ApiResponse> {
            Ok(self.0.clone())
        }
        async fn put(&self, _url: &str, _data: &Value) -> Result<ApiResponse> {
            Ok(self.0.clone())
        }
        async fn delete(&self, _url: &str) -> Result<ApiResponse> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn malformed_bodies_fail_only_their_cases() {
        let client = Canned(
            ApiResponse::new(200).with_json(&serde_json::json!({ "id": 1, "title": "no body" })),
        );
        let report = run_suite(&client, BASE).await.unwrap();

        let get_post = report.outcome(ApiCase::GetPost.name()).unwrap();
        assert!(!get_post.passed);
        assert!(get_post.detail.as_deref().unwrap().contains("Invalid payload"));

        assert!(report.outcome(ApiCase::DeletePost.name()).unwrap().passed);
        assert!(report.outcome(ApiCase::ContentTypeHeader.name()).unwrap().passed);
        assert!(!report.outcome(ApiCase::MissingPost.name()).unwrap().passed);
    }
}
