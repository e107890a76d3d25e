use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum UserWriteError {
    #[error("username or email already taken")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: &NewUserRow) -> Result<User, UserWriteError>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>>;
    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>>;
    // Case-insensitive substring match on username when `search` is set
    async fn list(&self, search: Option<&str>) -> anyhow::Result<Vec<User>>;
    // Returns None when the user no longer exists
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserWriteError>;
    // Owned messages, follow edges and likes go with the user
    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool>;
}
