use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::messages::message::{Message, MessageDraft};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, draft: &MessageDraft) -> anyhow::Result<Message>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Message>>;
    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Message>>;
    /// Newest first, across several authors.
    async fn list_by_authors(&self, author_ids: &[Uuid], limit: i64)
    -> anyhow::Result<Vec<Message>>;
    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64>;
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
}
