pub mod cache_service;
pub mod image_service;
