pub mod auth;
pub mod likes;
pub mod messages;
pub mod users;
