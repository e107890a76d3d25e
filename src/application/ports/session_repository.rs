use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::users::session::UserSession;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, expires_at: DateTime<Utc>)
    -> anyhow::Result<UserSession>;
    /// Unexpired sessions only.
    async fn find_active(&self, id: Uuid) -> anyhow::Result<Option<UserSession>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
