// src/main.rs
mod config;
mod dtos;
mod handlers;
mod middleware;
mod models;
mod pagination;
mod repositories;
mod services;
mod validators;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use deadpool_postgres::Pool;
use log::{error, info};

use crate::config::{AppConfig, AuthConfig};
use crate::handlers::comment_handlers::add_comment;
use crate::handlers::error_handlers::page_not_found;
use crate::handlers::feed_handlers::{follow_index, group_posts, index, profile};
use crate::handlers::follow_handlers::{profile_follow, profile_unfollow};
use crate::handlers::post_handlers::{new_post, new_post_form, post_edit, post_edit_form, post_view};
use crate::services::cache_service::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub pg_pool: Pool,
    pub media_root: String,
}

/// Route table. Registration order matters: the fixed routes must come
/// before the `/{username}/...` patterns that would otherwise swallow
/// them.
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(follow_index)
        .service(new_post_form)
        .service(new_post)
        .service(group_posts)
        .service(profile_follow)
        .service(profile_unfollow)
        .service(post_edit_form)
        .service(post_edit)
        .service(add_comment)
        .service(post_view)
        .service(profile)
        .default_service(web::route().to(page_not_found));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let app_config = AppConfig::from_env();
    let auth_config = match AuthConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load auth config: {}", e);
            std::process::exit(1);
        }
    };

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        pg_pool,
        media_root: app_config.media_root.clone(),
    });
    let cache = web::Data::new(CacheService::new());
    let auth_data = web::Data::new(auth_config);

    let allowed_origins = app_config.allowed_origins.clone();
    let bind_address = app_config.bind_address.clone();
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(cache.clone())
            .app_data(auth_data.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
