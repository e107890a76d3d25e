use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::messages::like::{Like, LikeToggle};
use crate::domain::messages::message::Message;

#[derive(thiserror::Error, Debug)]
pub enum LikeWriteError {
    #[error("message no longer exists")]
    MissingMessage,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait LikesRepository: Send + Sync {
    /// Adds the like, or removes it when already present, atomically.
    async fn toggle(&self, user_id: Uuid, message_id: Uuid) -> Result<LikeToggle, LikeWriteError>;
    async fn find(&self, user_id: Uuid, message_id: Uuid) -> anyhow::Result<Option<Like>>;
    async fn liked_messages(&self, user_id: Uuid) -> anyhow::Result<Vec<Message>>;
    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64>;
}
