use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed edge: `user_id` follows `author_id`. The table enforces
/// uniqueness per pair and forbids self-edges; the handler-level guard
/// below is kept as well so a blocked follow never reaches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub user_id: Uuid,
    pub author_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

/// Application-level guard for `profile_follow`: self-follows are blocked
/// here and duplicates are blocked both here and by the unique constraint.
pub fn can_follow(requester: Uuid, target: Uuid, already_following: bool) -> bool {
    requester != target && !already_following
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_follow_is_blocked() {
        let id = Uuid::new_v4();
        assert!(!can_follow(id, id, false));
    }

    #[test]
    fn duplicate_follow_is_blocked() {
        assert!(!can_follow(Uuid::new_v4(), Uuid::new_v4(), true));
    }

    #[test]
    fn fresh_follow_is_allowed() {
        assert!(can_follow(Uuid::new_v4(), Uuid::new_v4(), false));
    }
}
