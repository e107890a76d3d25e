pub mod follows_repository_sqlx;
pub mod likes_repository_sqlx;
pub mod message_repository_sqlx;
pub mod session_repository_sqlx;
pub mod user_repository_sqlx;
