pub mod follows_repository;
pub mod likes_repository;
pub mod message_repository;
pub mod session_repository;
pub mod user_repository;
