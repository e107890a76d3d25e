use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::messages::MessageWithAuthorDto;
use crate::application::use_cases::messages::create_message::CreateMessage;
use crate::application::use_cases::messages::delete_message::DeleteMessage;
use crate::application::use_cases::messages::get_message::GetMessage;
use crate::bootstrap::app_context::AppContext;
use crate::domain::messages::message::Message;
use crate::presentation::http::auth::MessageResponse;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::session::{self, Session};
use crate::presentation::http::users::UserSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageItem {
    pub id: Uuid,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
}

impl From<Message> for MessageItem {
    fn from(m: Message) -> Self {
        MessageItem {
            id: m.id,
            text: m.text,
            timestamp: m.timestamp,
            user_id: m.user_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageDetail {
    pub message: MessageItem,
    pub author: UserSummary,
    /// Whether the logged-in viewer likes this message; absent for anonymous viewers.
    pub liked: Option<bool>,
}

impl From<MessageWithAuthorDto> for MessageDetail {
    fn from(d: MessageWithAuthorDto) -> Self {
        MessageDetail {
            message: d.message.into(),
            author: d.author.into(),
            liked: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    pub text: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/messages/new", post(create_message))
        .route("/messages/:id", get(show_message))
        .route("/messages/:id/delete", post(delete_message))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/messages/new", tag = "Messages", request_body = CreateMessageRequest,
    responses((status = 201, body = MessageDetail), (status = 400, description = "Invalid request"), (status = 401, description = "Access unauthorized")))]
pub async fn create_message(
    State(ctx): State<AppContext>,
    session: Session,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageDetail>), ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let repo = ctx.message_repo();
    let uc = CreateMessage {
        repo: repo.as_ref(),
    };
    let message = uc.execute(Some(me.id), &req.text).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageDetail {
            message: message.into(),
            author: me.into(),
            liked: Some(false),
        }),
    ))
}

#[utoipa::path(get, path = "/messages/{id}", tag = "Messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses((status = 200, body = MessageDetail), (status = 404, description = "Not found")))]
pub async fn show_message(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageDetail>, ApiError> {
    let messages = ctx.message_repo();
    let users = ctx.user_repo();
    let uc = GetMessage {
        messages: messages.as_ref(),
        users: users.as_ref(),
    };
    let found = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Message not found.".into()))?;
    let liked = match session.actor.user_id() {
        Some(viewer) => Some(ctx.likes_repo().find(viewer, id).await?.is_some()),
        None => None,
    };
    let mut detail = MessageDetail::from(found);
    detail.liked = liked;
    Ok(Json(detail))
}

#[utoipa::path(post, path = "/messages/{id}/delete", tag = "Messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses((status = 200, body = MessageResponse), (status = 401, description = "Access unauthorized"), (status = 404, description = "Not found")))]
pub async fn delete_message(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let repo = ctx.message_repo();
    let uc = DeleteMessage {
        repo: repo.as_ref(),
    };
    uc.execute(me.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Message deleted.".into(),
    }))
}
