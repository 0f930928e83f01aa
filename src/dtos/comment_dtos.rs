use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserPublic;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentOut {
    pub id: i64,
    pub text: String,
    pub author: UserPublic,
    pub created_at: DateTime<Utc>,
}
