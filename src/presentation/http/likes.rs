use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::likes::toggle_like::ToggleLike;
use crate::bootstrap::app_context::AppContext;
use crate::domain::messages::like::LikeToggle;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::session::{self, Session};

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub message: String,
    pub message_id: Uuid,
    pub liked: bool,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/add_like/:message_id", post(add_like))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/users/add_like/{message_id}", tag = "Likes",
    params(("message_id" = Uuid, Path, description = "Message to like or unlike")),
    responses(
        (status = 200, body = LikeResponse),
        (status = 400, description = "Own message"),
        (status = 401, description = "Access unauthorized"),
        (status = 404, description = "Not found")
    ))]
pub async fn add_like(
    State(ctx): State<AppContext>,
    session: Session,
    Path(message_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let messages = ctx.message_repo();
    let likes = ctx.likes_repo();
    let uc = ToggleLike {
        messages: messages.as_ref(),
        likes: likes.as_ref(),
    };
    let outcome = uc.execute(me.id, message_id).await?;
    let (message, liked) = match outcome {
        LikeToggle::Added => ("Message added to likes!", true),
        LikeToggle::Removed => ("Message removed from likes.", false),
    };
    Ok(Json(LikeResponse {
        message: message.into(),
        message_id,
        liked,
    }))
}
