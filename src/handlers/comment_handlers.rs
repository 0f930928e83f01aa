// src/handlers/comment_handlers.rs
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::dtos::comment_dtos::CreateCommentRequest;
use crate::handlers::error_handlers::{repo_error_response, server_error_response};
use crate::handlers::post_handlers::post_url;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::comment::NewComment;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::post_repository::PostRepository;
use crate::AppState;

/// POST /{username}/{post_id}/comment/
/// Note the post is fetched by id only, without the author-username
/// cross-check `post_view`/`post_edit` perform; the redirect afterwards
/// goes to the post's actual author, not the path username.
#[post("/{username}/{post_id}/comment/")]
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    user: AuthenticatedUser,
    body: web::Json<CreateCommentRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let (_username, post_id) = path.into_inner();
    let post = match PostRepository::get_by_id(&state.pg_pool, post_id).await {
        Ok(post) => post,
        Err(e) => return repo_error_response(e, req.path()),
    };

    let new_comment = NewComment {
        text: body.text.clone(),
    };
    if let Err(msg) = new_comment.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Validation failed",
            "errors": { "text": msg },
        }));
    }

    match CommentRepository::create(&state.pg_pool, post.id, user.user_id, &new_comment.text).await
    {
        Ok(id) => {
            log::info!("comment {} added to post {} by {}", id, post.id, user.username);
            HttpResponse::SeeOther()
                .append_header((header::LOCATION, post_url(&post.author.username, post.id)))
                .finish()
        }
        Err(e) => {
            log::error!("failed to create comment: {}", e);
            server_error_response()
        }
    }
}
