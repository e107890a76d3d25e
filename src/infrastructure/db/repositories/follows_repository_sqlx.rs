use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::follows_repository::FollowsRepository;
use crate::domain::users::follow::Follow;
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::user_repository_sqlx::user_from_row;

pub struct SqlxFollowsRepository {
    pub pool: PgPool,
}

impl SqlxFollowsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowsRepository for SqlxFollowsRepository {
    async fn add(&self, follow: Follow) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO follows (user_being_followed_id, user_following_id) VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(follow.user_being_followed_id)
        .bind(follow.user_following_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn remove(&self, follow: Follow) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "DELETE FROM follows WHERE user_being_followed_id = $1 AND user_following_id = $2",
        )
        .bind(follow.user_being_followed_id)
        .bind(follow.user_following_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn exists(&self, follow: Follow) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                 SELECT 1 FROM follows
                 WHERE user_being_followed_id = $1 AND user_following_id = $2
               )"#,
        )
        .bind(follow.user_being_followed_id)
        .bind(follow.user_following_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn following_ids(&self, follower_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_being_followed_id FROM follows WHERE user_following_id = $1",
        )
        .bind(follower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn list_following(&self, follower_id: Uuid) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.username, u.email, u.image_url, u.header_image_url, u.bio, u.location
               FROM follows f
               JOIN users u ON u.id = f.user_being_followed_id
               WHERE f.user_following_id = $1
               ORDER BY u.username"#,
        )
        .bind(follower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn list_followers(&self, followed_id: Uuid) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.username, u.email, u.image_url, u.header_image_url, u.bio, u.location
               FROM follows f
               JOIN users u ON u.id = f.user_following_id
               WHERE f.user_being_followed_id = $1
               ORDER BY u.username"#,
        )
        .bind(followed_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn count_following(&self, follower_id: Uuid) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE user_following_id = $1",
        )
        .bind(follower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn count_followers(&self, followed_id: Uuid) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE user_being_followed_id = $1",
        )
        .bind(followed_id)
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

    #[sqlx::test(migrations = "./migrations")]
    async fn following_twice_keeps_one_edge(pool: PgPool) {
        let fan = insert_user(&pool, "fan").await;
        let star = insert_user(&pool, "star").await;
        let repo = SqlxFollowsRepository::new(pool);
        let edge = Follow::new(fan, star);

        assert!(repo.add(edge).await.unwrap());
        assert!(!repo.add(edge).await.unwrap());
        assert_eq!(repo.count_followers(star).await.unwrap(), 1);
        assert_eq!(repo.count_following(fan).await.unwrap(), 1);
        assert!(repo.exists(edge).await.unwrap());
        assert!(!repo.exists(Follow::new(star, fan)).await.unwrap());
        assert_eq!(repo.following_ids(fan).await.unwrap(), vec![star]);
        assert_eq!(repo.list_followers(star).await.unwrap()[0].id, fan);

        assert!(repo.remove(edge).await.unwrap());
        assert!(!repo.remove(edge).await.unwrap());
        assert_eq!(repo.count_followers(star).await.unwrap(), 0);
    }
}
