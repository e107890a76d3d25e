use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::user::User;

pub struct Authenticate<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Authenticate<'a, R> {
    /// `None` covers both an unknown username and a wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        let creds = match self
            .repo
            .find_credentials_by_username(req.username.trim())
            .await?
        {
            Some(c) => c,
            None => return Ok(None),
        };
        if passwords::verify_password(&creds.password_hash, &req.password) {
            Ok(Some(creds.user))
        } else {
            tracing::debug!(user_id = %creds.user.id, "login_password_mismatch");
            Ok(None)
        }
    }
}
