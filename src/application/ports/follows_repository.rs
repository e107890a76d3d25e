use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::follow::Follow;
use crate::domain::users::user::User;

#[async_trait]
pub trait FollowsRepository: Send + Sync {
    /// Returns false when the edge already existed.
    async fn add(&self, follow: Follow) -> anyhow::Result<bool>;
    async fn remove(&self, follow: Follow) -> anyhow::Result<bool>;
    async fn exists(&self, follow: Follow) -> anyhow::Result<bool>;
    async fn following_ids(&self, follower_id: Uuid) -> anyhow::Result<Vec<Uuid>>;
    async fn list_following(&self, follower_id: Uuid) -> anyhow::Result<Vec<User>>;
    async fn list_followers(&self, followed_id: Uuid) -> anyhow::Result<Vec<User>>;
    async fn count_following(&self, follower_id: Uuid) -> anyhow::Result<i64>;
    async fn count_followers(&self, followed_id: Uuid) -> anyhow::Result<i64>;
}
