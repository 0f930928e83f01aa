// src/repositories/user_repository.rs
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::models::user::User;
use crate::repositories::RepoError;

pub struct UserRepository;

fn map_user(row: Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}

impl UserRepository {
    /// Resolve a profile by username. `NotFound` surfaces as a 404.
    pub async fn get_by_username(pool: &Pool, username: &str) -> Result<User, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, username, email, created_at FROM users WHERE username = $1",
                &[&username],
            )
            .await?;
        row.map(map_user).ok_or(RepoError::NotFound)
    }
}
