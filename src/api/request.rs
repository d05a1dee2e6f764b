//! Requests against the posts resource
//!
//! Bodies are serialized once here, so the text recorded in the report is
//! byte-for-byte what goes on the wire.

use serde::Serialize;

use super::method::HttpMethod;
use super::payload::{NewPost, PostPatch, PostReplacement};
use crate::common::Result;

/// Collection path of the resource under test
pub const POSTS_PATH: &str = "/posts";

/// A request against the posts resource, ready to send and to record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInput {
    pub method: HttpMethod,
    pub path: String,
    /// Serialized JSON body, exactly as sent on the wire
    pub body: Option<String>,
}

impl RequestInput {
    pub fn get_post(id: u64) -> Self {
        Self::without_body(HttpMethod::Get, item_path(id))
    }

    pub fn create_post(post: &NewPost) -> Result<Self> {
        Self::with_body(HttpMethod::Post, POSTS_PATH.to_string(), post)
    }

    pub fn replace_post(update: &PostReplacement) -> Result<Self> {
        Self::with_body(HttpMethod::Put, item_path(update.id), update)
    }

    pub fn patch_post(id: u64, patch: &PostPatch) -> Result<Self> {
        Self::with_body(HttpMethod::Patch, item_path(id), patch)
    }

    pub fn delete_post(id: u64) -> Self {
        Self::without_body(HttpMethod::Delete, item_path(id))
    }

    /// Report title, e.g. `GET /posts/1`
    pub fn title(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    fn without_body(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            body: None,
        }
    }

    fn with_body<T: Serialize>(method: HttpMethod, path: String, body: &T) -> Result<Self> {
        Ok(Self {
            method,
            path,
            body: Some(serde_json::to_string(body)?),
        })
    }
}

fn item_path(id: u64) -> String {
    format!("{POSTS_PATH}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(RequestInput::get_post(5).title(), "GET /posts/5");
        assert_eq!(RequestInput::delete_post(10).title(), "DELETE /posts/10");

        let create = RequestInput::create_post(&NewPost {
            title: "foo1".into(),
            body: "bar1".into(),
            user_id: 1,
        })
        .unwrap();
        assert_eq!(create.title(), "POST /posts");
    }

    #[test]
    fn test_bodies_only_on_writes() {
        assert!(RequestInput::get_post(1).body.is_none());
        assert!(RequestInput::delete_post(1).body.is_none());

        let put = RequestInput::replace_post(&PostReplacement::new(1, "t", "b")).unwrap();
        assert_eq!(put.path, "/posts/1");
        assert_eq!(
            put.body.as_deref(),
            Some(r#"{"id":1,"title":"t","body":"b","userId":1}"#)
        );

        let patch = RequestInput::patch_post(2, &PostPatch { title: "p".into() }).unwrap();
        assert_eq!(patch.method, HttpMethod::Patch);
        assert_eq!(patch.body.as_deref(), Some(r#"{"title":"p"}"#));

        for request in [RequestInput::get_post(1), put, patch, RequestInput::delete_post(1)] {
            assert_eq!(request.body.is_some(), request.method.has_body());
        }
    }
}
