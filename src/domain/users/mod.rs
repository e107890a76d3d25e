pub mod follow;
pub mod session;
pub mod user;
