// src/repositories/group_repository.rs
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::models::group::Group;
use crate::repositories::RepoError;

pub struct GroupRepository;

fn map_group(row: Row) -> Group {
    Group {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
    }
}

impl GroupRepository {
    pub async fn get_by_slug(pool: &Pool, slug: &str) -> Result<Group, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, title, slug, description FROM groups WHERE slug = $1",
                &[&slug],
            )
            .await?;
        row.map(map_group).ok_or(RepoError::NotFound)
    }

    /// Used by the post form to check the referenced group exists before
    /// a save is attempted.
    pub async fn exists(pool: &Pool, id: i64) -> Result<bool, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one("SELECT EXISTS(SELECT 1 FROM groups WHERE id = $1)", &[&id])
            .await?;
        Ok(row.get(0))
    }

    /// Choices for the group select on the post form.
    pub async fn list_all(pool: &Pool) -> Result<Vec<Group>, RepoError> {
        let client = pool.get().await?;
        let rows = client
            .query(
                "SELECT id, title, slug, description FROM groups ORDER BY title",
                &[],
            )
            .await?;
        Ok(rows.into_iter().map(map_group).collect())
    }
}
