//! Recorded payloads
//!
//! A payload is printed with its `[REQUEST]`/`[RESPONSE]` tag and kept as a
//! JSON attachment of the case.

use std::fmt::{self, Display};

/// Media type declared for every recorded payload
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Encoding declared for every recorded payload
pub const UTF8_ENCODING: &str = "UTF-8";

/// Which side of the exchange a payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Request,
    Response,
}

impl Channel {
    /// Console prefix
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Request => "[REQUEST]",
            Channel::Response => "[RESPONSE]",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named payload attached to a case, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub title: String,
    pub media_type: &'static str,
    pub encoding: &'static str,
    pub content: String,
}

impl Attachment {
    pub fn json(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            media_type: JSON_MEDIA_TYPE,
            encoding: UTF8_ENCODING,
            content: content.into(),
        }
    }
}

/// Console rendering of a recorded payload
pub fn console_line(channel: Channel, title: &str, payload: &str) -> String {
    format!("{} {}:\n{}", channel.tag(), title, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_line() {
        assert_eq!(
            console_line(Channel::Request, "POST /posts", r#"{"title":"foo1"}"#),
            "[REQUEST] POST /posts:\n{\"title\":\"foo1\"}"
        );
        assert_eq!(
            console_line(Channel::Response, "DELETE /posts/1", "{}"),
            "[RESPONSE] DELETE /posts/1:\n{}"
        );
    }

    #[test]
    fn test_json_attachment_metadata() {
        let attachment = Attachment::json("GET /posts/1", "Request sent");
        assert_eq!(attachment.media_type, "application/json");
        assert_eq!(attachment.encoding, "UTF-8");
    }
}
