// src/handlers/feed_handlers.rs - the paginated, permission-filtered post lists
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::dtos::feed_dtos::{FeedPageOut, GroupFeedOut, PageQuery, ProfileOut};
use crate::handlers::error_handlers::{repo_error_response, server_error_response};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::pagination::{Paginator, POSTS_PER_PAGE};
use crate::repositories::follow_repository::FollowRepository;
use crate::repositories::group_repository::GroupRepository;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::cache_service::{CacheService, INDEX_CACHE_TTL};
use crate::AppState;

#[derive(Serialize)]
struct ApiResponse<T: serde::Serialize> {
    status: String,
    message: String,
    data: Option<T>,
}

fn envelope<T: Serialize>(message: &str, data: T) -> ApiResponse<T> {
    ApiResponse {
        status: "success".to_string(),
        message: message.to_string(),
        data: Some(data),
    }
}

/// GET /
/// Public feed of all posts by recency. The serialized body is cached per
/// page for a short window, so two fetches inside it return identical
/// bytes even when posts were created in between.
#[get("/")]
pub async fn index(
    state: web::Data<AppState>,
    cache: web::Data<CacheService>,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let cache_key = format!("index:page={}", query.page.unwrap_or(1));
    let rendered = cache
        .get_or_compute(&cache_key, INDEX_CACHE_TTL, || async {
            let total = PostRepository::count_all(&state.pg_pool)
                .await
                .map_err(|e| repo_error_response(e, req.path()))?;
            let paginator = Paginator::new(total, POSTS_PER_PAGE);
            let page = paginator.get_page(query.page);

            let posts = PostRepository::list_page(
                &state.pg_pool,
                POSTS_PER_PAGE,
                paginator.offset(page),
            )
            .await
            .map_err(|e| repo_error_response(e, req.path()))?;

            let context = FeedPageOut {
                page: paginator.meta(page),
                posts,
            };
            serde_json::to_string(&envelope("Feed retrieved", context)).map_err(|e| {
                log::error!("failed to serialize index feed: {}", e);
                server_error_response()
            })
        })
        .await;

    match rendered {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body),
        Err(response) => response,
    }
}

/// GET /group/{slug}/
/// Posts published into one group; 404 for an unknown slug.
#[get("/group/{slug}/")]
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let slug = path.into_inner();
    if !crate::validators::is_valid_slug(&slug) {
        return crate::handlers::error_handlers::not_found_response(req.path());
    }
    let group = match GroupRepository::get_by_slug(&state.pg_pool, &slug).await {
        Ok(group) => group,
        Err(e) => return repo_error_response(e, req.path()),
    };

    let total = match PostRepository::count_by_group(&state.pg_pool, group.id).await {
        Ok(n) => n,
        Err(e) => return repo_error_response(e, req.path()),
    };
    let paginator = Paginator::new(total, POSTS_PER_PAGE);
    let page = paginator.get_page(query.page);

    match PostRepository::list_by_group(
        &state.pg_pool,
        group.id,
        POSTS_PER_PAGE,
        paginator.offset(page),
    )
    .await
    {
        Ok(posts) => HttpResponse::Ok().json(envelope(
            "Group feed retrieved",
            GroupFeedOut {
                group,
                page: paginator.meta(page),
                posts,
            },
        )),
        Err(e) => repo_error_response(e, req.path()),
    }
}

/// GET /follow/
/// Personalized feed: posts authored by anyone the requester follows.
/// Anonymous requests are redirected to the login flow by the extractor.
#[get("/follow/")]
pub async fn follow_index(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let total = match PostRepository::count_feed(&state.pg_pool, user.user_id).await {
        Ok(n) => n,
        Err(e) => return repo_error_response(e, req.path()),
    };
    let paginator = Paginator::new(total, POSTS_PER_PAGE);
    let page = paginator.get_page(query.page);

    match PostRepository::list_feed(
        &state.pg_pool,
        user.user_id,
        POSTS_PER_PAGE,
        paginator.offset(page),
    )
    .await
    {
        Ok(posts) => HttpResponse::Ok().json(envelope(
            "Follow feed retrieved",
            FeedPageOut {
                page: paginator.meta(page),
                posts,
            },
        )),
        Err(e) => repo_error_response(e, req.path()),
    }
}

/// GET /{username}/
/// An author's page. Authenticated viewers also learn whether they
/// already follow the author; anonymous viewers get no flag.
#[get("/{username}/")]
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: Option<AuthenticatedUser>,
    req: HttpRequest,
) -> HttpResponse {
    let username = path.into_inner();
    let author = match UserRepository::get_by_username(&state.pg_pool, &username).await {
        Ok(author) => author,
        Err(e) => return repo_error_response(e, req.path()),
    };

    let following = match viewer {
        Some(viewer) => {
            match FollowRepository::exists(&state.pg_pool, viewer.user_id, author.id).await {
                Ok(exists) => Some(exists),
                Err(e) => return repo_error_response(e, req.path()),
            }
        }
        None => None,
    };

    let total = match PostRepository::count_by_author(&state.pg_pool, author.id).await {
        Ok(n) => n,
        Err(e) => return repo_error_response(e, req.path()),
    };
    let paginator = Paginator::new(total, POSTS_PER_PAGE);
    let page = paginator.get_page(query.page);

    match PostRepository::list_by_author(
        &state.pg_pool,
        author.id,
        POSTS_PER_PAGE,
        paginator.offset(page),
    )
    .await
    {
        Ok(posts) => HttpResponse::Ok().json(envelope(
            "Profile retrieved",
            ProfileOut {
                author: author.into(),
                following,
                page: paginator.meta(page),
                posts,
            },
        )),
        Err(e) => repo_error_response(e, req.path()),
    }
}
