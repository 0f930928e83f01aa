// src/repositories/comment_repository.rs
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::dtos::comment_dtos::CommentOut;
use crate::models::user::UserPublic;
use crate::repositories::RepoError;

pub struct CommentRepository;

fn map_comment(row: Row) -> CommentOut {
    CommentOut {
        id: row.get("id"),
        text: row.get("text"),
        author: UserPublic {
            id: row.get("author_id"),
            username: row.get("username"),
        },
        created_at: row.get("created_at"),
    }
}

impl CommentRepository {
    pub async fn list_for_post(pool: &Pool, post_id: i64) -> Result<Vec<CommentOut>, RepoError> {
        let client = pool.get().await?;
        let rows = client
            .query(
                "SELECT c.id, c.text, c.created_at, u.id AS author_id, u.username
                 FROM comments c
                 JOIN users u ON u.id = c.author_id
                 WHERE c.post_id = $1
                 ORDER BY c.created_at, c.id",
                &[&post_id],
            )
            .await?;
        Ok(rows.into_iter().map(map_comment).collect())
    }

    pub async fn create(
        pool: &Pool,
        post_id: i64,
        author_id: Uuid,
        text: &str,
    ) -> Result<i64, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO comments (text, post_id, author_id)
                 VALUES ($1, $2, $3) RETURNING id",
                &[&text, &post_id, &author_id],
            )
            .await?;
        Ok(row.get(0))
    }
}
