pub mod comment_handlers;
pub mod error_handlers;
pub mod feed_handlers;
pub mod follow_handlers;
pub mod post_handlers;
