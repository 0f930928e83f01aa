// src/repositories/post_repository.rs - feed queries and the post lifecycle
use deadpool_postgres::Pool;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::dtos::post_dtos::PostOut;
use crate::models::group::Group;
use crate::models::post::NewPost;
use crate::models::user::UserPublic;
use crate::repositories::RepoError;

/// Every read goes through the same joined projection so a post renders
/// identically on every route it appears on.
const POST_SELECT: &str = "
    SELECT p.id, p.text, p.image, p.created_at,
           u.id AS author_id, u.username,
           g.id AS group_id, g.title, g.slug, g.description
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN groups g ON g.id = p.group_id";

const POST_ORDER: &str = " ORDER BY p.created_at DESC, p.id DESC";

fn map_post(row: Row) -> PostOut {
    let group = row
        .get::<_, Option<i64>>("group_id")
        .map(|id| Group {
            id,
            title: row.get("title"),
            slug: row.get("slug"),
            description: row.get("description"),
        });
    PostOut {
        id: row.get("id"),
        text: row.get("text"),
        author: UserPublic {
            id: row.get("author_id"),
            username: row.get("username"),
        },
        group,
        image: row.get("image"),
        created_at: row.get("created_at"),
    }
}

async fn count(pool: &Pool, where_clause: &str, params: &[&(dyn ToSql + Sync)]) -> Result<i64, RepoError> {
    let client = pool.get().await?;
    let query = format!("SELECT COUNT(*) FROM posts p{}", where_clause);
    let row = client.query_one(query.as_str(), params).await?;
    Ok(row.get(0))
}

async fn page(
    pool: &Pool,
    where_clause: &str,
    params: &[&(dyn ToSql + Sync)],
    limit: i64,
    offset: i64,
) -> Result<Vec<PostOut>, RepoError> {
    let client = pool.get().await?;
    let query = format!(
        "{}{}{} LIMIT ${} OFFSET ${}",
        POST_SELECT,
        where_clause,
        POST_ORDER,
        params.len() + 1,
        params.len() + 2,
    );
    let mut all_params: Vec<&(dyn ToSql + Sync)> = params.to_vec();
    all_params.push(&limit);
    all_params.push(&offset);
    let rows = client.query(query.as_str(), &all_params).await?;
    Ok(rows.into_iter().map(map_post).collect())
}

pub struct PostRepository;

impl PostRepository {
    pub async fn count_all(pool: &Pool) -> Result<i64, RepoError> {
        count(pool, "", &[]).await
    }

    pub async fn list_page(pool: &Pool, limit: i64, offset: i64) -> Result<Vec<PostOut>, RepoError> {
        page(pool, "", &[], limit, offset).await
    }

    pub async fn count_by_group(pool: &Pool, group_id: i64) -> Result<i64, RepoError> {
        count(pool, " WHERE p.group_id = $1", &[&group_id]).await
    }

    pub async fn list_by_group(
        pool: &Pool,
        group_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostOut>, RepoError> {
        page(pool, " WHERE p.group_id = $1", &[&group_id], limit, offset).await
    }

    pub async fn count_by_author(pool: &Pool, author_id: Uuid) -> Result<i64, RepoError> {
        count(pool, " WHERE p.author_id = $1", &[&author_id]).await
    }

    pub async fn list_by_author(
        pool: &Pool,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostOut>, RepoError> {
        page(pool, " WHERE p.author_id = $1", &[&author_id], limit, offset).await
    }

    /// The personalized feed: posts whose author the requester follows.
    pub async fn count_feed(pool: &Pool, user_id: Uuid) -> Result<i64, RepoError> {
        count(
            pool,
            " WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = $1)",
            &[&user_id],
        )
        .await
    }

    pub async fn list_feed(
        pool: &Pool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostOut>, RepoError> {
        page(
            pool,
            " WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = $1)",
            &[&user_id],
            limit,
            offset,
        )
        .await
    }

    /// Lookup by id only. `add_comment` resolves its post this way,
    /// without the author-username cross-check `get_by_id_and_author`
    /// performs.
    pub async fn get_by_id(pool: &Pool, id: i64) -> Result<PostOut, RepoError> {
        let client = pool.get().await?;
        let query = format!("{} WHERE p.id = $1", POST_SELECT);
        let row = client.query_opt(query.as_str(), &[&id]).await?;
        row.map(map_post).ok_or(RepoError::NotFound)
    }

    /// Lookup by (id, author username) pair. A real post id under the
    /// wrong username is `NotFound`, which doubles as an access check:
    /// crafted URLs cannot probe for other authors' post ids.
    pub async fn get_by_id_and_author(
        pool: &Pool,
        id: i64,
        username: &str,
    ) -> Result<PostOut, RepoError> {
        let client = pool.get().await?;
        let query = format!("{} WHERE p.id = $1 AND u.username = $2", POST_SELECT);
        let row = client.query_opt(query.as_str(), &[&id, &username]).await?;
        row.map(map_post).ok_or(RepoError::NotFound)
    }

    pub async fn create(pool: &Pool, author_id: Uuid, new_post: &NewPost) -> Result<i64, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (text, group_id, image, author_id)
                 VALUES ($1, $2, $3, $4) RETURNING id",
                &[&new_post.text, &new_post.group_id, &new_post.image, &author_id],
            )
            .await?;
        Ok(row.get(0))
    }

    /// Author and creation timestamp are never touched by an edit; the
    /// image column only changes when a replacement was uploaded.
    pub async fn update(pool: &Pool, id: i64, new_post: &NewPost) -> Result<(), RepoError> {
        let client = pool.get().await?;
        let updated = client
            .execute(
                "UPDATE posts
                 SET text = $1, group_id = $2, image = COALESCE($3, image)
                 WHERE id = $4",
                &[&new_post.text, &new_post.group_id, &new_post.image, &id],
            )
            .await?;
        if updated == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
