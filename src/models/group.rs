use serde::{Deserialize, Serialize};

/// A named community that posts can be published into. Groups are created
/// administratively and never deleted in the normal flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
