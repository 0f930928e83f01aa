use serde::{Deserialize, Serialize};

use crate::dtos::comment_dtos::CommentOut;
use crate::dtos::post_dtos::PostOut;
use crate::models::group::Group;
use crate::models::user::UserPublic;
use crate::pagination::PageMeta;

/// `?page=N` on the feed routes. A value that does not parse as a number
/// counts as absent, which the paginator resolves to page 1 rather than
/// rejecting the request.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Rendering context for `index` and `follow_index`.
#[derive(Debug, Serialize)]
pub struct FeedPageOut {
    pub page: PageMeta,
    pub posts: Vec<PostOut>,
}

/// Rendering context for `group_posts`.
#[derive(Debug, Serialize)]
pub struct GroupFeedOut {
    pub group: Group,
    pub page: PageMeta,
    pub posts: Vec<PostOut>,
}

/// Rendering context for `profile`. `following` is only present for
/// authenticated viewers; anonymous ones get no flag at all.
#[derive(Debug, Serialize)]
pub struct ProfileOut {
    pub author: UserPublic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    pub page: PageMeta,
    pub posts: Vec<PostOut>,
}

/// Rendering context for `post_view`: the post, its comments, and an
/// empty comment form for the template to render.
#[derive(Debug, Serialize)]
pub struct PostDetailOut {
    pub post: PostOut,
    pub comments: Vec<CommentOut>,
    pub comment_form: CommentFormOut,
}

#[derive(Debug, Serialize)]
pub struct CommentFormOut {
    pub text: String,
}

impl CommentFormOut {
    pub fn empty() -> Self {
        CommentFormOut {
            text: String::new(),
        }
    }
}
