use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Candidate comment bound from request fields; author and post are
/// stamped by the handler, never form-bound.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
}

impl NewComment {
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
    fn empty_text_is_rejected() {
        assert!(NewComment { text: "".into() }.validate().is_err());
        assert!(NewComment { text: " \n".into() }.validate().is_err());
    }

    #[test]
    fn plain_text_passes() {
        assert!(NewComment { text: "nice".into() }.validate().is_ok());
    }
}
