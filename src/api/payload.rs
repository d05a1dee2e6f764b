//! Request bodies and the post resource shape
//!
//! Bodies are serialized with serde so caller-supplied strings containing
//! quotes or control characters always produce valid JSON.

use serde::{Deserialize, Serialize};

/// User id sent with every full update
pub const REPLACEMENT_USER_ID: u64 = 1;

/// A post as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Body of `PUT /posts/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReplacement {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl PostReplacement {
    /// Full replacement owned by the fixed update user
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            user_id: REPLACEMENT_USER_ID,
        }
    }
}

/// Body of `PATCH /posts/{id}`; only the title is sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_post_wire_shape() {
        let post = NewPost {
            title: "foo1".into(),
            body: "bar1".into(),
            user_id: 1,
        };
        assert_eq!(
            serde_json::to_string(&post).unwrap(),
            r#"{"title":"foo1","body":"bar1","userId":1}"#
        );
    }

    #[test]
    fn test_replacement_uses_fixed_user() {
        let update = PostReplacement::new(2, "updated title 2", "updated body 2");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"id": 2, "title": "updated title 2", "body": "updated body 2", "userId": 1})
        );
    }

    #[test]
    fn test_patch_sends_only_title() {
        let patch = PostPatch {
            title: "patched title 1".into(),
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":"patched title 1"}"#);
    }

    #[test]
    fn test_quotes_and_control_characters_are_escaped() {
        let post = NewPost {
            title: "say \"hi\"".into(),
            body: "line1\nline2\t\u{1}".into(),
            user_id: 3,
        };
        let text = serde_json::to_string(&post).unwrap();
        let parsed: NewPost = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, post);
        assert!(text.contains(r#"say \"hi\""#));
        assert!(text.contains(r"\u0001"));
    }
}
