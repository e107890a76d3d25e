use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::message_repository::MessageRepository;
use crate::domain::messages::message::{Message, MessageDraft};
use crate::infrastructure::db::PgPool;

pub struct SqlxMessageRepository {
    pub pool: PgPool,
}

impl SqlxMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn message_from_row(r: &PgRow) -> Message {
    Message {
        id: r.get("id"),
        text: r.get("text"),
        timestamp: r.get("timestamp"),
        user_id: r.get("user_id"),
    }
}

#[async_trait]
impl MessageRepository for SqlxMessageRepository {
    async fn create(&self, draft: &MessageDraft) -> anyhow::Result<Message> {
        let row = sqlx::query(
            r#"INSERT INTO messages (text, user_id) VALUES ($1, $2)
               RETURNING id, text, timestamp, user_id"#,
        )
        .bind(&draft.text)
        .bind(draft.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(message_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Message>> {
        let row = sqlx::query("SELECT id, text, timestamp, user_id FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(message_from_row))
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"SELECT id, text, timestamp, user_id FROM messages
               WHERE user_id = $1
               ORDER BY timestamp DESC
               LIMIT $2"#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(message_from_row).collect())
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
    ) -> anyhow::Result<Vec<Message>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT id, text, timestamp, user_id FROM messages
               WHERE user_id = ANY($1)
               ORDER BY timestamp DESC
               LIMIT $2"#,
        )
        .bind(author_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(message_from_row).collect())
    }

    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
