// src/handlers/follow_handlers.rs
use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::handlers::error_handlers::{repo_error_response, server_error_response};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::follow::can_follow;
use crate::repositories::follow_repository::FollowRepository;
use crate::repositories::user_repository::UserRepository;
use crate::AppState;

fn back_to_profile(username: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, format!("/{}/", username)))
        .finish()
}

/// GET /{username}/follow/
/// Idempotent: a second follow or a self-follow is a no-op, and either
/// way the client lands back on the profile.
#[get("/{username}/follow/")]
pub async fn profile_follow(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> HttpResponse {
    let username = path.into_inner();
    let author = match UserRepository::get_by_username(&state.pg_pool, &username).await {
        Ok(author) => author,
        Err(e) => return repo_error_response(e, req.path()),
    };

    let already = match FollowRepository::exists(&state.pg_pool, user.user_id, author.id).await {
        Ok(exists) => exists,
        Err(e) => return repo_error_response(e, req.path()),
    };

    if can_follow(user.user_id, author.id, already) {
        if let Err(e) = FollowRepository::create(&state.pg_pool, user.user_id, author.id).await {
            log::error!("failed to create follow edge: {}", e);
            return server_error_response();
        }
        log::info!("{} now follows {}", user.username, author.username);
    }

    back_to_profile(&username)
}

/// GET /{username}/unfollow/
/// Deleting a missing edge is a no-op; the redirect happens regardless.
#[get("/{username}/unfollow/")]
pub async fn profile_unfollow(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> HttpResponse {
    let username = path.into_inner();
    let author = match UserRepository::get_by_username(&state.pg_pool, &username).await {
        Ok(author) => author,
        Err(e) => return repo_error_response(e, req.path()),
    };

    if let Err(e) = FollowRepository::delete(&state.pg_pool, user.user_id, author.id).await {
        log::error!("failed to delete follow edge: {}", e);
        return server_error_response();
    }

    back_to_profile(&username)
}
