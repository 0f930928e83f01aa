pub mod comment_dtos;
pub mod feed_dtos;
pub mod post_dtos;
