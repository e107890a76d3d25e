use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::access::Unauthorized;
use crate::application::use_cases::auth::delete_account::DeleteAccountError;
use crate::application::use_cases::auth::signup::SignupError;
use crate::application::use_cases::likes::toggle_like::ToggleLikeError;
use crate::application::use_cases::messages::create_message::CreateMessageError;
use crate::application::use_cases::messages::delete_message::DeleteMessageError;
use crate::application::use_cases::users::edit_profile::EditProfileError;
use crate::application::use_cases::users::follow_user::FollowError;

pub const UNAUTHORIZED_MESSAGE: &str = "Access unauthorized.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Access unauthorized.")]
    Unauthorized,

    #[error("Access unauthorized; incorrect password.")]
    IncorrectPassword,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::IncorrectPassword | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized | ApiError::IncorrectPassword => "UNAUTHORIZED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request_failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));
        (self.status(), body).into_response()
    }
}

impl From<Unauthorized> for ApiError {
    fn from(_: Unauthorized) -> Self {
        ApiError::Unauthorized
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::Invalid(msg) => ApiError::BadRequest(msg),
            SignupError::Conflict => ApiError::Conflict(err.to_string()),
            SignupError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<EditProfileError> for ApiError {
    fn from(err: EditProfileError) -> Self {
        match err {
            EditProfileError::IncorrectPassword => ApiError::IncorrectPassword,
            // The session points at a user that is gone
            EditProfileError::NotFound => ApiError::Unauthorized,
            EditProfileError::Invalid(msg) => ApiError::BadRequest(msg),
            EditProfileError::Conflict => ApiError::Conflict(err.to_string()),
            EditProfileError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(err: DeleteAccountError) -> Self {
        match err {
            // Same as a stale session: the account is already gone
            DeleteAccountError::NotFound => ApiError::Unauthorized,
            DeleteAccountError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<FollowError> for ApiError {
    fn from(err: FollowError) -> Self {
        match err {
            FollowError::SelfFollow => ApiError::BadRequest(err.to_string()),
            FollowError::NotFound => ApiError::NotFound(err.to_string()),
            FollowError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<ToggleLikeError> for ApiError {
    fn from(err: ToggleLikeError) -> Self {
        match err {
            ToggleLikeError::OwnMessage => ApiError::BadRequest(err.to_string()),
            ToggleLikeError::NotFound => ApiError::NotFound(err.to_string()),
            ToggleLikeError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<CreateMessageError> for ApiError {
    fn from(err: CreateMessageError) -> Self {
        match err {
            CreateMessageError::Invalid(e) => ApiError::BadRequest(e.to_string()),
            CreateMessageError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<DeleteMessageError> for ApiError {
    fn from(err: DeleteMessageError) -> Self {
        match err {
            DeleteMessageError::NotFound => ApiError::NotFound(err.to_string()),
            DeleteMessageError::NotOwner => ApiError::Unauthorized,
            DeleteMessageError::Storage(e) => ApiError::Internal(e),
        }
    }
}
