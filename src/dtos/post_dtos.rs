use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::group::Group;
use crate::models::user::UserPublic;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    /// Group id to publish into; must reference an existing group.
    pub group: Option<i64>,
    pub image: Option<ImageUpload>,
}

/// Images travel base64-encoded inside the JSON body. The declared
/// content type is cross-checked against the sniffed bytes; the stored
/// filename is generated, never taken from the client.
#[derive(Debug, Deserialize)]
pub struct ImageUpload {
    pub content_type: String, // "image/jpeg", "image/png", etc.
    pub data: String,         // base64 encoded image
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostOut {
    pub id: i64,
    pub text: String,
    pub author: UserPublic,
    pub group: Option<Group>,
    /// Relative media path, e.g. `posts/abc.png`.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Context for the post form screens (`GET /new/`, `GET .../edit/`).
#[derive(Debug, Serialize)]
pub struct PostFormOut {
    pub text: String,
    pub group: Option<i64>,
    pub image: Option<String>,
    /// Choices for the group select.
    pub groups: Vec<Group>,
}
