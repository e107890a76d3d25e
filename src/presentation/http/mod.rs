use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod error;
pub mod health;
pub mod home;
pub mod likes;
pub mod messages;
pub mod session;
pub mod users;

/// All Warbler pages; health and docs are mounted separately by the binary.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(home::routes(ctx.clone()))
        .merge(auth::routes(ctx.clone()))
        .merge(users::routes(ctx.clone()))
        .merge(likes::routes(ctx.clone()))
        .merge(messages::routes(ctx))
}
