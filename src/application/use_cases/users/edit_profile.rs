use uuid::Uuid;

use crate::application::ports::user_repository::{ProfileChanges, UserRepository, UserWriteError};
use crate::application::services::passwords;
use crate::domain::users::user::{
    DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, User, image_or_default, validate_email,
    validate_username,
};

pub struct EditProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct EditProfileRequest {
    pub username: String,
    pub email: String,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Current password, re-checked before anything is written.
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum EditProfileError {
    #[error("Access unauthorized; incorrect password.")]
    IncorrectPassword,
    #[error("User not found.")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
    #[error("Username or email already taken.")]
    Conflict,
    #[error("failed to update profile")]
    Storage(#[source] anyhow::Error),
}

impl From<UserWriteError> for EditProfileError {
    fn from(err: UserWriteError) -> Self {
        match err {
            UserWriteError::Conflict => EditProfileError::Conflict,
            UserWriteError::Other(e) => EditProfileError::Storage(e),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<'a, R: UserRepository + ?Sized> EditProfile<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        req: EditProfileRequest,
    ) -> Result<User, EditProfileError> {
        let creds = self
            .repo
            .find_credentials_by_id(user_id)
            .await
            .map_err(EditProfileError::Storage)?
            .ok_or(EditProfileError::NotFound)?;
        if !passwords::verify_password(&creds.password_hash, &req.password) {
            tracing::warn!(user_id = %user_id, "profile_edit_wrong_password");
            return Err(EditProfileError::IncorrectPassword);
        }

        validate_username(&req.username).map_err(EditProfileError::Invalid)?;
        validate_email(&req.email).map_err(EditProfileError::Invalid)?;

        let changes = ProfileChanges {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            image_url: image_or_default(req.image_url.as_deref(), DEFAULT_IMAGE_URL),
            header_image_url: image_or_default(
                req.header_image_url.as_deref(),
                DEFAULT_HEADER_IMAGE_URL,
            ),
            bio: non_blank(req.bio),
            location: non_blank(req.location),
        };
        let user = self
            .repo
            .update_profile(user_id, &changes)
            .await?
            .ok_or(EditProfileError::NotFound)?;
        tracing::info!(user_id = %user_id, "profile_updated");
        Ok(user)
    }
}
