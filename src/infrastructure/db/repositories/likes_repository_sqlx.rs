use async_trait::async_trait;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::application::ports::likes_repository::{LikeWriteError, LikesRepository};
use crate::domain::messages::like::{Like, LikeToggle};
use crate::domain::messages::message::Message;
use crate::infrastructure::db::{PgPool, is_foreign_key_violation};
use crate::infrastructure::db::repositories::message_repository_sqlx::message_from_row;

pub struct SqlxLikesRepository {
    pub pool: PgPool,
}

impl SqlxLikesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> LikeWriteError {
    if is_foreign_key_violation(&err, "likes_message_id_fkey") {
        LikeWriteError::MissingMessage
    } else {
        LikeWriteError::Other(err.into())
    }
}

async fn delete_like(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    message_id: Uuid,
) -> Result<bool, LikeWriteError> {
    let res = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND message_id = $2")
        .bind(user_id)
        .bind(message_id)
        .execute(&mut **tx)
        .await
        .map_err(map_write_error)?;
    Ok(res.rows_affected() > 0)
}

#[async_trait]
impl LikesRepository for SqlxLikesRepository {
    async fn toggle(&self, user_id: Uuid, message_id: Uuid) -> Result<LikeToggle, LikeWriteError> {
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;
        let removed = delete_like(&mut tx, user_id, message_id).await?;
        let outcome = if removed {
            LikeToggle::Removed
        } else {
            let inserted = sqlx::query(
                r#"INSERT INTO likes (user_id, message_id) VALUES ($1, $2)
                   ON CONFLICT (user_id, message_id) DO NOTHING"#,
            )
            .bind(user_id)
            .bind(message_id)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?;
            if inserted.rows_affected() > 0 {
                LikeToggle::Added
            } else {
                // A concurrent toggle committed the like first; this one undoes it
                delete_like(&mut tx, user_id, message_id).await?;
                LikeToggle::Removed
            }
        };
        tx.commit().await.map_err(map_write_error)?;
        Ok(outcome)
    }

    async fn find(&self, user_id: Uuid, message_id: Uuid) -> anyhow::Result<Option<Like>> {
        let row = sqlx::query(
            "SELECT id, user_id, message_id FROM likes WHERE user_id = $1 AND message_id = $2",
        )
        .bind(user_id)
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| Like {
            id: r.get("id"),
            user_id: r.get("user_id"),
            message_id: r.get("message_id"),
        }))
    }

    async fn liked_messages(&self, user_id: Uuid) -> anyhow::Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"SELECT m.id, m.text, m.timestamp, m.user_id
               FROM likes l
               JOIN messages m ON m.id = l.message_id
               WHERE l.user_id = $1
               ORDER BY m.timestamp DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(message_from_row).collect())
    }

    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    async fn insert_user(pool: &PgPool, username: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, username, password_hash) VALUES ($1, $2, 'x') RETURNING id",
        )
        .bind(format!("{username}@test.com"))
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn insert_message(pool: &PgPool, user_id: Uuid) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO messages (text, user_id) VALUES ('likeable', $1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn toggle_adds_then_removes(pool: PgPool) {
        let author = insert_user(&pool, "author").await;
        let fan = insert_user(&pool, "fan").await;
        let msg = insert_message(&pool, author).await;
        let repo = SqlxLikesRepository::new(pool);

        assert_eq!(repo.toggle(fan, msg).await.unwrap(), LikeToggle::Added);
        assert!(repo.find(fan, msg).await.unwrap().is_some());
        assert_eq!(repo.count_for_user(fan).await.unwrap(), 1);
        assert_eq!(repo.liked_messages(fan).await.unwrap()[0].id, msg);

        assert_eq!(repo.toggle(fan, msg).await.unwrap(), LikeToggle::Removed);
        assert!(repo.find(fan, msg).await.unwrap().is_none());
        assert_eq!(repo.count_for_user(fan).await.unwrap(), 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn liking_a_deleted_message_reports_it_missing(pool: PgPool) {
        let author = insert_user(&pool, "author").await;
        let fan = insert_user(&pool, "fan").await;
        let msg = insert_message(&pool, author).await;
        sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(msg)
            .execute(&pool)
            .await
            .unwrap();
        let repo = SqlxLikesRepository::new(pool);

        assert!(matches!(
            repo.toggle(fan, msg).await,
            Err(LikeWriteError::MissingMessage)
        ));
        assert_eq!(repo.count_for_user(fan).await.unwrap(), 0);
    }
}
