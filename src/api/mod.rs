//! HTTP access to the posts resource
//!
//! A thin layer over reqwest: typed request bodies in, status and parsed
//! JSON out. Assertions live in the testing module.

pub mod client;
pub mod method;
pub mod payload;
pub mod request;
pub mod response;

pub use client::PostsClient;
pub use method::HttpMethod;
pub use payload::{NewPost, Post, PostPatch, PostReplacement};
pub use request::RequestInput;
pub use response::ApiResponse;
