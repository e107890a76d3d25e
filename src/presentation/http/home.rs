use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::messages::home_timeline::HomeTimeline;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::messages::MessageDetail;
use crate::presentation::http::session::{self, Session};
use crate::presentation::http::users::UserSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub heading: String,
    pub user: Option<UserSummary>,
    pub following_count: Option<i64>,
    pub messages: Vec<MessageDetail>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/", get(homepage)).with_state(ctx)
}

#[utoipa::path(get, path = "/", tag = "Home", responses((status = 200, body = HomeResponse)))]
pub async fn homepage(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<HomeResponse>, ApiError> {
    let Some(me) = session::optional_user(&ctx, &session).await? else {
        return Ok(Json(HomeResponse {
            heading: "What's Happening?".into(),
            user: None,
            following_count: None,
            messages: Vec::new(),
        }));
    };

    let users = ctx.user_repo();
    let messages = ctx.message_repo();
    let follows = ctx.follows_repo();
    let uc = HomeTimeline {
        users: users.as_ref(),
        messages: messages.as_ref(),
        follows: follows.as_ref(),
    };
    let timeline = uc.execute(me.id).await?;
    let following_count = follows.count_following(me.id).await?;

    Ok(Json(HomeResponse {
        heading: format!("@{}", me.username),
        user: Some(me.into()),
        following_count: Some(following_count),
        messages: timeline.into_iter().map(Into::into).collect(),
    }))
}
