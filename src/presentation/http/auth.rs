use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::login::{Authenticate, LoginRequest as LoginDto};
use crate::application::use_cases::auth::sessions::EndSession;
use crate::application::use_cases::auth::signup::{Signup, SignupRequest as SignupDto};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::session::{self, Session};
use crate::presentation::http::users::AccountResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct FormResponse {
    pub heading: String,
    pub fields: Vec<String>,
}

impl FormResponse {
    pub fn new(heading: &str, fields: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub user: AccountResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/signup", tag = "Auth", security(()), responses(
    (status = 200, body = FormResponse)
))]
pub async fn signup_form() -> Json<FormResponse> {
    Json(FormResponse::new(
        "Join Warbler today.",
        &["username", "email", "password", "image_url"],
    ))
}

#[utoipa::path(post, path = "/signup", tag = "Auth", request_body = SignupRequest, security(()), responses(
    (status = 201, body = LoginResponse),
    (status = 400, description = "Validation failed"),
    (status = 409, description = "Username or email already taken")
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, HeaderMap, Json<LoginResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = Signup {
        repo: repo.as_ref(),
    };
    let dto = SignupDto {
        username: req.username,
        email: req.email,
        password: req.password,
        image_url: req.image_url,
    };
    let user = uc.execute(&dto).await?;
    let token = session::start_session(&ctx, user.id).await?;
    let headers = session::login_headers(&ctx.cfg, &token);
    Ok((
        StatusCode::CREATED,
        headers,
        Json(LoginResponse {
            message: format!("Welcome to Warbler, {}!", user.username),
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/login", tag = "Auth", security(()), responses(
    (status = 200, body = FormResponse)
))]
pub async fn login_form() -> Json<FormResponse> {
    Json(FormResponse::new("Welcome back.", &["username", "password"]))
}

#[utoipa::path(post, path = "/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, description = "Invalid credentials")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = Authenticate {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        username: req.username,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;
    let token = session::start_session(&ctx, user.id).await?;
    let headers = session::login_headers(&ctx.cfg, &token);
    tracing::info!(user_id = %user.id, "user_logged_in");
    Ok((
        headers,
        Json(LoginResponse {
            message: format!("Hello, {}!", user.username),
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/logout", tag = "Auth", responses((status = 200, body = MessageResponse)))]
pub async fn logout(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    if let Some(id) = session.id {
        let repo = ctx.session_repo();
        let uc = EndSession {
            repo: repo.as_ref(),
        };
        uc.execute(id).await?;
        tracing::info!(session_id = %id, "user_logged_out");
    }
    Ok((
        session::logout_headers(&ctx.cfg),
        Json(MessageResponse {
            message: "You have been logged out.".into(),
        }),
    ))
}
