// src/models/post.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub group_id: Option<i64>,
    /// Relative path under the media root, e.g. `posts/abc.png`.
    pub image: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Candidate post bound from request fields. The author is deliberately
/// not part of the bound fields; handlers stamp it from the session
/// identity so a client can never spoof authorship.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Text cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_required() {
        let post = NewPost {
            text: "   ".to_string(),
            group_id: None,
            image: None,
        };
        assert!(post.validate().is_err());
    }

    #[test]
    fn group_and_image_are_optional() {
        let post = NewPost {
            text: "hello".to_string(),
            group_id: None,
            image: None,
        };
        assert!(post.validate().is_ok());
    }
}
