// src/handlers/error_handlers.rs - 404/500 rendering contexts
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::repositories::RepoError;

/// Default service: anything the route table does not match.
pub async fn page_not_found(req: HttpRequest) -> HttpResponse {
    not_found_response(req.path())
}

pub fn not_found_response(path: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "status": "error",
        "message": "Page not found",
        "path": path,
    }))
}

pub fn server_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "status": "error",
        "message": "Server error",
    }))
}

/// Unknown slug/username/post-id surfaces as the 404 page; anything else
/// is a server fault scoped to this one request.
pub fn repo_error_response(err: RepoError, path: &str) -> HttpResponse {
    match err {
        RepoError::NotFound => not_found_response(path),
        other => {
            log::error!("repository failure on {}: {}", path, other);
            server_error_response()
        }
    }
}
