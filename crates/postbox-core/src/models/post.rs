//! Post model

use serde::{Deserialize, Serialize};

/// Identifier type for posts. Ids are assigned by the remote origin and are
/// stable across fetches; they are never generated locally.
pub type PostId = i64;

/// A post in the system.
///
/// Serves both as the persisted row shape and as the wire shape for the
/// remote source. On the wire `id`, `userId`, `title` and `body` are all
/// required and unknown fields are ignored; `read` is a local-only flag
/// that never appears in remote payloads and defaults to false on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (primary key)
    pub id: PostId,
    /// Originating user; immutable once set
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Title line shown in list views
    pub title: String,
    /// Full body shown in the detail view
    pub body: String,
    /// Local read marker
    #[serde(default)]
    pub read: bool,
}

impl Post {
    /// Create a new unread post.
    #[must_use]
    pub fn new(id: PostId, user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
            read: false,
        }
    }

    /// Copy of this post with the read flag cleared.
    ///
    /// Used when ingesting remote payloads, where `read` must always start
    /// out false regardless of what the decoder produced.
    #[must_use]
    pub fn as_unread(&self) -> Self {
        Self {
            read: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_defaults_unread() {
        let post = Post::new(1, 7, "Title", "Body");
        assert!(!post.read);
        assert_eq!(post.user_id, 7);
    }

    #[test]
    fn test_wire_decode_defaults_read_false() {
        let post: Post =
            serde_json::from_str(r#"{"id":3,"userId":2,"title":"T","body":"B"}"#).unwrap();
        assert_eq!(post, Post::new(3, 2, "T", "B"));
    }

    #[test]
    fn test_wire_decode_ignores_unknown_fields() {
        let post: Post = serde_json::from_str(
            r#"{"id":3,"userId":2,"title":"T","body":"B","etag":"abc","rank":9}"#,
        )
        .unwrap();
        assert_eq!(post.id, 3);
    }

    #[test]
    fn test_wire_decode_requires_all_fields() {
        let result = serde_json::from_str::<Post>(r#"{"id":3,"userId":2,"title":"T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_as_unread_clears_flag() {
        let post = Post {
            read: true,
            ..Post::new(1, 1, "T", "B")
        };
        assert!(!post.as_unread().read);
    }
}
