use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::session_repository::SessionRepository;
use crate::domain::users::session::UserSession;
use crate::infrastructure::db::PgPool;

pub struct SqlxSessionRepository {
    pub pool: PgPool,
}

impl SqlxSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_from_row(r: &sqlx::postgres::PgRow) -> UserSession {
    UserSession {
        id: r.get("id"),
        user_id: r.get("user_id"),
        expires_at: r.get("expires_at"),
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(
        &self,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<UserSession> {
        let row = sqlx::query(
            r#"INSERT INTO sessions (user_id, expires_at) VALUES ($1, $2)
               RETURNING id, user_id, expires_at"#,
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(session_from_row(&row))
    }

    async fn find_active(&self, id: Uuid) -> anyhow::Result<Option<UserSession>> {
        let row = sqlx::query(
            "SELECT id, user_id, expires_at FROM sessions WHERE id = $1 AND expires_at > now()",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(session_from_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
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

    #[sqlx::test(migrations = "./migrations")]
    async fn session_resolves_until_deleted(pool: PgPool) {
        let user_id = insert_user(&pool, "sessioned").await;
        let repo = SqlxSessionRepository::new(pool);

        let s = repo
            .create(user_id, Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        let found = repo.find_active(s.id).await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);

        assert!(repo.delete(s.id).await.unwrap());
        assert!(repo.find_active(s.id).await.unwrap().is_none());
        assert!(!repo.delete(s.id).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn expired_session_is_not_active(pool: PgPool) {
        let user_id = insert_user(&pool, "stale").await;
        let repo = SqlxSessionRepository::new(pool);

        let s = repo
            .create(user_id, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert!(repo.find_active(s.id).await.unwrap().is_none());
    }
}
