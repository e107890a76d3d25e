pub mod list_likes;
pub mod toggle_like;
