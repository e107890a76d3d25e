use crate::application::ports::user_repository::{NewUserRow, UserRepository, UserWriteError};
use crate::application::services::passwords;
use crate::domain::users::user::{
    self as users, DEFAULT_IMAGE_URL, User, validate_email, validate_password, validate_username,
};

pub struct Signup<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SignupError {
    #[error("{0}")]
    Invalid(String),
    #[error("Username or email already taken.")]
    Conflict,
    #[error("failed to create user")]
    Storage(#[source] anyhow::Error),
}

impl From<UserWriteError> for SignupError {
    fn from(err: UserWriteError) -> Self {
        match err {
            UserWriteError::Conflict => SignupError::Conflict,
            UserWriteError::Other(e) => SignupError::Storage(e),
        }
    }
}

impl<'a, R: UserRepository + ?Sized> Signup<'a, R> {
    pub async fn execute(&self, req: &SignupRequest) -> Result<User, SignupError> {
        validate_username(&req.username).map_err(SignupError::Invalid)?;
        validate_email(&req.email).map_err(SignupError::Invalid)?;
        validate_password(&req.password).map_err(SignupError::Invalid)?;

        let password_hash =
            passwords::hash_password(&req.password).map_err(SignupError::Storage)?;
        let row = NewUserRow {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
            image_url: users::image_or_default(req.image_url.as_deref(), DEFAULT_IMAGE_URL),
        };
        let user = self.repo.create_user(&row).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user_signed_up");
        Ok(user)
    }
}
