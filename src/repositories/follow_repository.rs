// src/repositories/follow_repository.rs
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::repositories::RepoError;

pub struct FollowRepository;

impl FollowRepository {
    pub async fn exists(pool: &Pool, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)",
                &[&user_id, &author_id],
            )
            .await?;
        Ok(row.get(0))
    }

    /// Idempotent: the unique constraint plus ON CONFLICT makes a repeated
    /// follow a no-op even if two requests race past the exists() check.
    pub async fn create(pool: &Pool, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "INSERT INTO follows (user_id, author_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
                &[&user_id, &author_id],
            )
            .await?;
        Ok(())
    }

    /// Idempotent no-op when no edge exists.
    pub async fn delete(pool: &Pool, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "DELETE FROM follows WHERE user_id = $1 AND author_id = $2",
                &[&user_id, &author_id],
            )
            .await?;
        Ok(())
    }
}
