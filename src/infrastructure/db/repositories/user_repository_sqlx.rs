use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{
    NewUserRow, ProfileChanges, UserCredentials, UserRepository, UserWriteError,
};
use crate::domain::users::user::User;
use crate::infrastructure::db::{PgPool, is_unique_violation};

const USER_COLUMNS: &str = "id, username, email, image_url, header_image_url, bio, location";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn user_from_row(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        image_url: r.get("image_url"),
        header_image_url: r.get("header_image_url"),
        bio: r.get("bio"),
        location: r.get("location"),
    }
}

fn map_write_error(err: sqlx::Error) -> UserWriteError {
    if is_unique_violation(&err) {
        UserWriteError::Conflict
    } else {
        UserWriteError::Other(err.into())
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, new_user: &NewUserRow) -> Result<User, UserWriteError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, image_url) VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(user_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let rows = sqlx::query(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = $1");
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| UserCredentials {
            user: user_from_row(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| UserCredentials {
            user: user_from_row(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn list(&self, search: Option<&str>) -> anyhow::Result<Vec<User>> {
        let rows = match search {
            Some(term) => {
                let sql = format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE username ILIKE $1 ORDER BY username"
                );
                sqlx::query(&sql)
                    .bind(format!("%{}%", escape_like(term)))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserWriteError> {
        let sql = format!(
            r#"UPDATE users
               SET username = $2, email = $3, image_url = $4, header_image_url = $5,
                   bio = $6, location = $7
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&changes.username)
            .bind(&changes.email)
            .bind(&changes.image_url)
            .bind(&changes.header_image_url)
            .bind(changes.bio.as_deref())
            .bind(changes.location.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        // messages, follows, likes and sessions rows go via ON DELETE CASCADE
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    fn new_user(username: &str) -> NewUserRow {
        NewUserRow {
            username: username.into(),
            email: format!("{username}@test.com"),
            password_hash: "x".into(),
            image_url: crate::domain::users::user::DEFAULT_IMAGE_URL.into(),
        }
    }

    async fn count(pool: &PgPool, sql: &str, id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("test_user"), "test\\_user");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_username_or_email_is_a_conflict(pool: PgPool) {
        let repo = SqlxUserRepository::new(pool);
        repo.create_user(&new_user("taken")).await.unwrap();

        let mut same_name = new_user("taken");
        same_name.email = "other@test.com".into();
        assert!(matches!(
            repo.create_user(&same_name).await,
            Err(UserWriteError::Conflict)
        ));

        let mut same_email = new_user("other");
        same_email.email = "taken@test.com".into();
        assert!(matches!(
            repo.create_user(&same_email).await,
            Err(UserWriteError::Conflict)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn search_is_case_insensitive_and_literal(pool: PgPool) {
        let repo = SqlxUserRepository::new(pool);
        for name in ["test_user", "testXuser", "Alice", "bob"] {
            repo.create_user(&new_user(name)).await.unwrap();
        }
        // Sorted here; ORDER BY username follows the database collation
        let names = |users: Vec<User>| {
            let mut names: Vec<String> = users.into_iter().map(|u| u.username).collect();
            names.sort();
            names
        };

        assert_eq!(names(repo.list(Some("ALI")).await.unwrap()), vec!["Alice"]);
        assert_eq!(
            names(repo.list(Some("test")).await.unwrap()),
            vec!["testXuser", "test_user"]
        );
        // `_` matches itself, not any character
        assert_eq!(names(repo.list(Some("test_")).await.unwrap()), vec!["test_user"]);
        assert_eq!(repo.list(None).await.unwrap().len(), 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn deleting_user_cascades_to_owned_rows(pool: PgPool) {
        let repo = SqlxUserRepository::new(pool.clone());
        let doomed = repo.create_user(&new_user("doomed")).await.unwrap().id;
        let survivor = repo.create_user(&new_user("survivor")).await.unwrap().id;

        let insert_message = "INSERT INTO messages (text, user_id) VALUES ('hi', $1) RETURNING id";
        let doomed_msg: Uuid = sqlx::query_scalar(insert_message)
            .bind(doomed)
            .fetch_one(&pool)
            .await
            .unwrap();
        let survivor_msg: Uuid = sqlx::query_scalar(insert_message)
            .bind(survivor)
            .fetch_one(&pool)
            .await
            .unwrap();
        for (followed, follower) in [(doomed, survivor), (survivor, doomed)] {
            sqlx::query(
                "INSERT INTO follows (user_being_followed_id, user_following_id) VALUES ($1, $2)",
            )
            .bind(followed)
            .bind(follower)
            .execute(&pool)
            .await
            .unwrap();
        }
        for (user, msg) in [(doomed, survivor_msg), (survivor, doomed_msg)] {
            sqlx::query("INSERT INTO likes (user_id, message_id) VALUES ($1, $2)")
                .bind(user)
                .bind(msg)
                .execute(&pool)
                .await
                .unwrap();
        }
        sqlx::query(
            "INSERT INTO sessions (user_id, expires_at) VALUES ($1, now() + interval '1 hour')",
        )
        .bind(doomed)
        .execute(&pool)
        .await
        .unwrap();

        assert!(repo.delete_user(doomed).await.unwrap());

        assert!(repo.find_by_id(doomed).await.unwrap().is_none());
        let messages = "SELECT COUNT(*) FROM messages WHERE user_id = $1";
        assert_eq!(count(&pool, messages, doomed).await, 0);
        assert_eq!(count(&pool, messages, survivor).await, 1);
        let follows = "SELECT COUNT(*) FROM follows \
                       WHERE user_being_followed_id = $1 OR user_following_id = $1";
        assert_eq!(count(&pool, follows, doomed).await, 0);
        assert_eq!(count(&pool, follows, survivor).await, 0);
        // Both the doomed user's like and the like on the doomed user's message
        let likes = "SELECT COUNT(*) FROM likes WHERE user_id = $1 OR message_id = $1";
        assert_eq!(count(&pool, likes, doomed).await, 0);
        assert_eq!(count(&pool, likes, survivor).await, 0);
        assert_eq!(count(&pool, likes, doomed_msg).await, 0);
        let sessions = "SELECT COUNT(*) FROM sessions WHERE user_id = $1";
        assert_eq!(count(&pool, sessions, doomed).await, 0);

        assert!(!repo.delete_user(doomed).await.unwrap());
    }
}
