use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::delete_account::DeleteAccount;
use crate::application::use_cases::likes::list_likes::ListLikes;
use crate::application::use_cases::users::edit_profile::{EditProfile, EditProfileRequest};
use crate::application::use_cases::users::follow_user::FollowUser;
use crate::application::use_cases::users::get_profile::GetProfile;
use crate::application::use_cases::users::list_followers::ListFollowers;
use crate::application::use_cases::users::list_following::ListFollowing;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::relationship::Relationship;
use crate::application::use_cases::users::unfollow_user::UnfollowUser;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::auth::{FormResponse, MessageResponse};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::messages::MessageItem;
use crate::presentation::http::session::{self, Session};

/// Public view of a user; never carries the email.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub image_url: String,
    pub bio: Option<String>,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        UserSummary {
            id: u.id,
            username: u.username,
            image_url: u.image_url,
            bio: u.bio,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetail {
    pub id: Uuid,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl From<User> for UserDetail {
    fn from(u: User) -> Self {
        UserDetail {
            id: u.id,
            username: u.username,
            image_url: u.image_url,
            header_image_url: u.header_image_url,
            bio: u.bio,
            location: u.location,
        }
    }
}

/// What the logged-in user sees about themselves.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl From<User> for AccountResponse {
    fn from(u: User) -> Self {
        AccountResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            image_url: u.image_url,
            header_image_url: u.header_image_url,
            bio: u.bio,
            location: u.location,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserDetail,
    pub messages: Vec<MessageItem>,
    pub message_count: i64,
    pub following_count: i64,
    pub followers_count: i64,
    pub likes_count: i64,
    /// Only present when a different user is logged in.
    pub is_following: Option<bool>,
    pub is_followed_by: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionsResponse {
    pub heading: String,
    pub user: UserSummary,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikesResponse {
    pub heading: String,
    pub user: UserSummary,
    pub messages: Vec<MessageItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EditProfileForm {
    pub heading: String,
    pub fields: Vec<String>,
    pub user: AccountResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditProfileBody {
    pub username: String,
    pub email: String,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EditProfileResponse {
    pub message: String,
    pub user: AccountResponse,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub q: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/profile", get(edit_profile_form).post(edit_profile))
        .route("/users/delete", post(delete_user))
        .route("/users/follow/:id", post(follow_user))
        .route("/users/stop-following/:id", post(stop_following))
        .route("/users/:id", get(show_user))
        .route("/users/:id/following", get(show_following))
        .route("/users/:id/followers", get(show_followers))
        .route("/users/:id/likes", get(show_likes))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/users", tag = "Users",
    params(("q" = Option<String>, Query, description = "Username contains")),
    responses((status = 200, body = UserListResponse)))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    Query(q): Query<ListUsersQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute(q.q).await?;
    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = ProfileResponse), (status = 404, description = "Not found")))]
pub async fn show_user(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let users = ctx.user_repo();
    let messages = ctx.message_repo();
    let follows = ctx.follows_repo();
    let likes = ctx.likes_repo();
    let uc = GetProfile {
        users: users.as_ref(),
        messages: messages.as_ref(),
        follows: follows.as_ref(),
        likes: likes.as_ref(),
    };
    let profile = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;

    let relationship = match session.actor.user_id() {
        Some(viewer) if viewer != id => {
            let rel = Relationship {
                repo: follows.as_ref(),
            };
            Some(rel.between(viewer, id).await?)
        }
        _ => None,
    };

    Ok(Json(ProfileResponse {
        user: profile.user.into(),
        messages: profile.messages.into_iter().map(Into::into).collect(),
        message_count: profile.message_count,
        following_count: profile.following_count,
        followers_count: profile.followers_count,
        likes_count: profile.likes_count,
        is_following: relationship.map(|r| r.is_following),
        is_followed_by: relationship.map(|r| r.is_followed_by),
    }))
}

#[utoipa::path(get, path = "/users/{id}/following", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = ConnectionsResponse), (status = 401, description = "Access unauthorized"), (status = 404, description = "Not found")))]
pub async fn show_following(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    session::require_user(&ctx, &session).await?;
    following_of(&ctx, id).await.map(Json)
}

#[utoipa::path(get, path = "/users/{id}/followers", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = ConnectionsResponse), (status = 401, description = "Access unauthorized"), (status = 404, description = "Not found")))]
pub async fn show_followers(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    session::require_user(&ctx, &session).await?;
    let users = ctx.user_repo();
    let follows = ctx.follows_repo();
    let uc = ListFollowers {
        users: users.as_ref(),
        follows: follows.as_ref(),
    };
    let (user, followers) = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;
    Ok(Json(ConnectionsResponse {
        heading: "Followers".into(),
        user: user.into(),
        users: followers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/users/{id}/likes", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = LikesResponse), (status = 401, description = "Access unauthorized"), (status = 404, description = "Not found")))]
pub async fn show_likes(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<LikesResponse>, ApiError> {
    session::require_user(&ctx, &session).await?;
    let users = ctx.user_repo();
    let likes = ctx.likes_repo();
    let uc = ListLikes {
        users: users.as_ref(),
        likes: likes.as_ref(),
    };
    let (user, liked) = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;
    Ok(Json(LikesResponse {
        heading: format!("@{}'s liked Warbles", user.username),
        user: user.into(),
        messages: liked.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/users/follow/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User to follow")),
    responses((status = 200, body = ConnectionsResponse), (status = 400, description = "Invalid request"), (status = 401, description = "Access unauthorized"), (status = 404, description = "Not found")))]
pub async fn follow_user(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let users = ctx.user_repo();
    let follows = ctx.follows_repo();
    let uc = FollowUser {
        users: users.as_ref(),
        follows: follows.as_ref(),
    };
    uc.execute(me.id, id).await?;
    following_of(&ctx, me.id).await.map(Json)
}

#[utoipa::path(post, path = "/users/stop-following/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User to stop following")),
    responses((status = 200, body = ConnectionsResponse), (status = 401, description = "Access unauthorized")))]
pub async fn stop_following(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let follows = ctx.follows_repo();
    let uc = UnfollowUser {
        follows: follows.as_ref(),
    };
    uc.execute(me.id, id).await?;
    following_of(&ctx, me.id).await.map(Json)
}

async fn following_of(ctx: &AppContext, id: Uuid) -> Result<ConnectionsResponse, ApiError> {
    let users = ctx.user_repo();
    let follows = ctx.follows_repo();
    let uc = ListFollowing {
        users: users.as_ref(),
        follows: follows.as_ref(),
    };
    let (user, following) = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;
    Ok(ConnectionsResponse {
        heading: "Following".into(),
        user: user.into(),
        users: following.into_iter().map(Into::into).collect(),
    })
}

#[utoipa::path(get, path = "/users/profile", tag = "Users",
    responses((status = 200, body = EditProfileForm), (status = 401, description = "Access unauthorized")))]
pub async fn edit_profile_form(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<EditProfileForm>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let form = FormResponse::new(
        "Edit Your Profile.",
        &[
            "username",
            "email",
            "image_url",
            "header_image_url",
            "bio",
            "location",
            "password",
        ],
    );
    Ok(Json(EditProfileForm {
        heading: form.heading,
        fields: form.fields,
        user: me.into(),
    }))
}

#[utoipa::path(post, path = "/users/profile", tag = "Users", request_body = EditProfileBody,
    responses((status = 200, body = EditProfileResponse), (status = 401, description = "Access unauthorized"), (status = 409, description = "Username or email already taken")))]
pub async fn edit_profile(
    State(ctx): State<AppContext>,
    session: Session,
    Json(body): Json<EditProfileBody>,
) -> Result<Json<EditProfileResponse>, ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let repo = ctx.user_repo();
    let uc = EditProfile {
        repo: repo.as_ref(),
    };
    let req = EditProfileRequest {
        username: body.username,
        email: body.email,
        image_url: body.image_url,
        header_image_url: body.header_image_url,
        bio: body.bio,
        location: body.location,
        password: body.password,
    };
    let user = uc.execute(me.id, req).await?;
    Ok(Json(EditProfileResponse {
        message: "Profile updated.".into(),
        user: user.into(),
    }))
}

#[utoipa::path(post, path = "/users/delete", tag = "Users",
    responses((status = 200, body = MessageResponse), (status = 401, description = "Access unauthorized")))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let me = session::require_user(&ctx, &session).await?;
    let repo = ctx.user_repo();
    let uc = DeleteAccount {
        user_repo: repo.as_ref(),
    };
    uc.execute(me.id).await?;
    Ok((
        session::logout_headers(&ctx.cfg),
        Json(MessageResponse {
            message: "Profile deleted.".into(),
        }),
    ))
}
