// src/handlers/post_handlers.rs - create, view, edit
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::dtos::feed_dtos::{CommentFormOut, PostDetailOut};
use crate::dtos::post_dtos::{CreatePostRequest, PostFormOut};
use crate::handlers::error_handlers::{repo_error_response, server_error_response};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::post::NewPost;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::group_repository::GroupRepository;
use crate::repositories::post_repository::PostRepository;
use crate::AppState;

#[derive(Serialize)]
struct ApiResponse<T: serde::Serialize> {
    status: String,
    message: String,
    data: Option<T>,
}

pub fn post_url(username: &str, post_id: i64) -> String {
    format!("/{}/{}/", username, post_id)
}

fn form_error(field: &str, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "status": "error",
        "message": "Validation failed",
        "errors": { field: message },
    }))
}

/// Bind and validate the post form. Returns an unsaved `NewPost`; the
/// author is never taken from the form, callers stamp it from the session.
async fn bind_post_form(
    state: &AppState,
    body: &CreatePostRequest,
) -> Result<NewPost, HttpResponse> {
    if let Some(group_id) = body.group {
        match GroupRepository::exists(&state.pg_pool, group_id).await {
            Ok(true) => {}
            Ok(false) => return Err(form_error("group", "Select a valid group")),
            Err(e) => {
                log::error!("group lookup failed: {}", e);
                return Err(server_error_response());
            }
        }
    }

    let mut form = NewPost {
        text: body.text.clone(),
        group_id: body.group,
        image: None,
    };
    // Text is checked before the upload is touched so a rejected post
    // never leaves a stored image behind.
    form.validate().map_err(|msg| form_error("text", &msg))?;

    if let Some(upload) = &body.image {
        let (bytes, format) = crate::services::image_service::decode_and_validate(upload)
            .map_err(|e| form_error("image", &e.to_string()))?;
        let path =
            crate::services::image_service::store_post_image(&state.media_root, &bytes, format)
                .map_err(|e| {
                    log::error!("failed to store post image: {}", e);
                    server_error_response()
                })?;
        form.image = Some(path);
    }

    Ok(form)
}

/// GET /new/
/// Empty post form plus the group choices for the select.
#[get("/new/")]
pub async fn new_post_form(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> HttpResponse {
    match GroupRepository::list_all(&state.pg_pool).await {
        Ok(groups) => HttpResponse::Ok().json(ApiResponse {
            status: "success".to_string(),
            message: "New post form".to_string(),
            data: Some(PostFormOut {
                text: String::new(),
                group: None,
                image: None,
                groups,
            }),
        }),
        Err(e) => {
            log::error!("failed to load group choices: {}", e);
            server_error_response()
        }
    }
}

/// POST /new/
/// Create a post as the session user, then send the client back to the
/// index feed.
#[post("/new/")]
pub async fn new_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostRequest>,
) -> HttpResponse {
    let form = match bind_post_form(&state, &body).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    match PostRepository::create(&state.pg_pool, user.user_id, &form).await {
        Ok(id) => {
            log::info!("post {} created by {}", id, user.username);
            HttpResponse::SeeOther()
                .append_header((header::LOCATION, "/"))
                .finish()
        }
        Err(e) => {
            log::error!("failed to create post: {}", e);
            server_error_response()
        }
    }
}

/// GET /{username}/{post_id}/
/// Post read view: resolved by the (id, author username) pair, so a real
/// post id under the wrong username is a 404 rather than a leak. Context
/// carries the comments and an empty comment form.
#[get("/{username}/{post_id}/")]
pub async fn post_view(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    req: HttpRequest,
) -> HttpResponse {
    let (username, post_id) = path.into_inner();
    let post = match PostRepository::get_by_id_and_author(&state.pg_pool, post_id, &username).await
    {
        Ok(post) => post,
        Err(e) => return repo_error_response(e, req.path()),
    };

    match CommentRepository::list_for_post(&state.pg_pool, post.id).await {
        Ok(comments) => HttpResponse::Ok().json(ApiResponse {
            status: "success".to_string(),
            message: "Post retrieved".to_string(),
            data: Some(PostDetailOut {
                post,
                comments,
                comment_form: CommentFormOut::empty(),
            }),
        }),
        Err(e) => repo_error_response(e, req.path()),
    }
}

/// GET /{username}/{post_id}/edit/
/// Edit form, pre-filled. Same two-part check as the POST handler.
#[get("/{username}/{post_id}/edit/")]
pub async fn post_edit_form(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> HttpResponse {
    let (username, post_id) = path.into_inner();
    let post = match PostRepository::get_by_id_and_author(&state.pg_pool, post_id, &username).await
    {
        Ok(post) => post,
        Err(e) => return repo_error_response(e, req.path()),
    };
    if user.username != username {
        return HttpResponse::Found()
            .append_header((header::LOCATION, post_url(&username, post_id)))
            .finish();
    }

    match GroupRepository::list_all(&state.pg_pool).await {
        Ok(groups) => HttpResponse::Ok().json(ApiResponse {
            status: "success".to_string(),
            message: "Edit post form".to_string(),
            data: Some(PostFormOut {
                text: post.text,
                group: post.group.map(|g| g.id),
                image: post.image,
                groups,
            }),
        }),
        Err(e) => {
            log::error!("failed to load group choices: {}", e);
            server_error_response()
        }
    }
}

/// POST /{username}/{post_id}/edit/
/// The row is resolved by the (id, author username) pair, and on top of
/// that the path's claimed username must equal the session identity; a
/// mismatch is a silent redirect to the read view, not an error page.
/// Edits touch text/group/image only, never author or created timestamp.
#[post("/{username}/{post_id}/edit/")]
pub async fn post_edit(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let (username, post_id) = path.into_inner();
    if let Err(e) = PostRepository::get_by_id_and_author(&state.pg_pool, post_id, &username).await {
        return repo_error_response(e, req.path());
    }
    if user.username != username {
        return HttpResponse::Found()
            .append_header((header::LOCATION, post_url(&username, post_id)))
            .finish();
    }

    let form = match bind_post_form(&state, &body).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    match PostRepository::update(&state.pg_pool, post_id, &form).await {
        Ok(()) => HttpResponse::SeeOther()
            .append_header((header::LOCATION, post_url(&username, post_id)))
            .finish(),
        Err(e) => repo_error_response(e, req.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::post_dtos::ImageUpload;
    use base64::{engine::general_purpose, Engine as _};
    use deadpool_postgres::Runtime;
    use tokio_postgres::NoTls;
    use uuid::Uuid;

    /// State over a never-connected pool; the cases below stay on the
    /// binding path and never reach the database.
    fn state_with_media_root(media_root: &std::path::Path) -> AppState {
        let mut cfg = deadpool_postgres::Config::new();
        cfg.host = Some("127.0.0.1".into());
        cfg.user = Some("test".into());
        cfg.dbname = Some("test".into());
        AppState {
            pg_pool: cfg.create_pool(Some(Runtime::Tokio1), NoTls).unwrap(),
            media_root: media_root.display().to_string(),
        }
    }

    fn png_upload() -> ImageUpload {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        ImageUpload {
            content_type: "image/png".into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    #[test]
    fn post_url_shape_matches_routes() {
        assert_eq!(post_url("leo", 7), "/leo/7/");
    }

    #[actix_web::test]
    async fn bound_form_carries_the_body_fields() {
        let media_root = std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()));
        let state = state_with_media_root(&media_root);
        let body = CreatePostRequest {
            text: "hello".into(),
            group: None,
            image: None,
        };

        let form = bind_post_form(&state, &body).await.unwrap();
        assert_eq!(form.text, "hello");
        assert_eq!(form.group_id, None);
        assert_eq!(form.image, None);
    }

    #[actix_web::test]
    async fn rejected_text_stores_no_image() {
        let media_root = std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()));
        let state = state_with_media_root(&media_root);
        let body = CreatePostRequest {
            text: "   ".into(),
            group: None,
            image: Some(png_upload()),
        };

        assert!(bind_post_form(&state, &body).await.is_err());
        assert!(!media_root.join("posts").exists());
    }
}
