pub mod client;
pub mod jsonplaceholder;
pub mod models;

pub use client::ReqwestClient;
pub use jsonplaceholder::PostsApi;
pub use models::{NewPost, Post, User};
