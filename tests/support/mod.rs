#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

use warbler::application::ports::follows_repository::FollowsRepository;
use warbler::application::ports::likes_repository::{LikeWriteError, LikesRepository};
use warbler::application::ports::message_repository::MessageRepository;
use warbler::application::ports::session_repository::SessionRepository;
use warbler::application::ports::user_repository::{
    NewUserRow, ProfileChanges, UserCredentials, UserRepository, UserWriteError,
};
use warbler::application::services::passwords;
use warbler::application::use_cases::auth::signup::{Signup, SignupRequest};
use warbler::bootstrap::app_context::{AppContext, AppServices};
use warbler::bootstrap::config::{Config, DEV_SESSION_SECRET};
use warbler::domain::messages::like::{Like, LikeToggle};
use warbler::domain::messages::message::{Message, MessageDraft};
use warbler::domain::users::follow::Follow;
use warbler::domain::users::session::UserSession;
use warbler::domain::users::user::{DEFAULT_HEADER_IMAGE_URL, User};

pub const SEED_PASSWORD: &str = "password";

// Hashing is slow in debug builds, so seeded users share one hash.
static SEED_HASH: Lazy<String> =
    Lazy::new(|| passwords::hash_password(SEED_PASSWORD).expect("hash seed password"));

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    messages: Vec<Message>,
    follows: Vec<Follow>,
    likes: Vec<Like>,
    sessions: Vec<UserSession>,
}

/// In-memory stand-in for the Postgres schema, including its cascades.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn like_count(&self) -> usize {
        self.state.lock().unwrap().likes.len()
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }

    pub fn follow_count(&self) -> usize {
        self.state.lock().unwrap().follows.len()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    /// Inserts a row directly, bypassing signup validation and hashing.
    pub fn insert_raw_user(&self, username: &str, email: &str, password_hash: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            image_url: warbler::domain::users::user::DEFAULT_IMAGE_URL.into(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.into(),
            bio: None,
            location: None,
        };
        self.state
            .lock()
            .unwrap()
            .users
            .push((user.clone(), password_hash.into()));
        user
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new_user: &NewUserRow) -> Result<User, UserWriteError> {
        let mut st = self.state.lock().unwrap();
        if st
            .users
            .iter()
            .any(|(u, _)| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(UserWriteError::Conflict);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            image_url: new_user.image_url.clone(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.into(),
            bio: None,
            location: None,
        };
        st.users.push((user.clone(), new_user.password_hash.clone()));
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .iter()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, h)| UserCredentials {
                user: u.clone(),
                password_hash: h.clone(),
            }))
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, h)| UserCredentials {
                user: u.clone(),
                password_hash: h.clone(),
            }))
    }

    async fn list(&self, search: Option<&str>) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        let mut users: Vec<User> = st
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .filter(|u| match &needle {
                Some(n) => u.username.to_lowercase().contains(n),
                None => true,
            })
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserWriteError> {
        let mut st = self.state.lock().unwrap();
        if st.users.iter().any(|(u, _)| {
            u.id != id && (u.username == changes.username || u.email == changes.email)
        }) {
            return Err(UserWriteError::Conflict);
        }
        let Some((user, _)) = st.users.iter_mut().find(|(u, _)| u.id == id) else {
            return Ok(None);
        };
        user.username = changes.username.clone();
        user.email = changes.email.clone();
        user.image_url = changes.image_url.clone();
        user.header_image_url = changes.header_image_url.clone();
        user.bio = changes.bio.clone();
        user.location = changes.location.clone();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.users.len();
        st.users.retain(|(u, _)| u.id != id);
        if st.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<Uuid> = st
            .messages
            .iter()
            .filter(|m| m.user_id == id)
            .map(|m| m.id)
            .collect();
        st.messages.retain(|m| m.user_id != id);
        st.follows
            .retain(|f| f.user_following_id != id && f.user_being_followed_id != id);
        st.likes
            .retain(|l| l.user_id != id && !owned.contains(&l.message_id));
        st.sessions.retain(|s| s.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, draft: &MessageDraft) -> anyhow::Result<Message> {
        let mut st = self.state.lock().unwrap();
        anyhow::ensure!(
            st.users.iter().any(|(u, _)| u.id == draft.user_id),
            "foreign key violation on messages.user_id"
        );
        // Strictly increasing timestamps keep "newest first" deterministic
        let timestamp = Utc::now() + Duration::milliseconds(st.messages.len() as i64);
        let msg = Message {
            id: Uuid::new_v4(),
            text: draft.text.clone(),
            timestamp,
            user_id: draft.user_id,
        };
        st.messages.push(msg.clone());
        Ok(msg)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Message>> {
        let st = self.state.lock().unwrap();
        Ok(st.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Message>> {
        self.list_by_authors(&[user_id], limit).await
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
    ) -> anyhow::Result<Vec<Message>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Message> = st
            .messages
            .iter()
            .filter(|m| author_ids.contains(&m.user_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        out.truncate(limit.max(0) as usize);
        Ok(out)
    }

    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.messages.iter().filter(|m| m.user_id == user_id).count() as i64)
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.messages.len();
        st.messages.retain(|m| !(m.id == id && m.user_id == user_id));
        let deleted = st.messages.len() < before;
        if deleted {
            st.likes.retain(|l| l.message_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl FollowsRepository for MemoryStore {
    async fn add(&self, follow: Follow) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if st.follows.contains(&follow) {
            return Ok(false);
        }
        st.follows.push(follow);
        Ok(true)
    }

    async fn remove(&self, follow: Follow) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.follows.len();
        st.follows.retain(|f| *f != follow);
        Ok(st.follows.len() < before)
    }

    async fn exists(&self, follow: Follow) -> anyhow::Result<bool> {
        Ok(self.state.lock().unwrap().follows.contains(&follow))
    }

    async fn following_ids(&self, follower_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .follows
            .iter()
            .filter(|f| f.user_following_id == follower_id)
            .map(|f| f.user_being_followed_id)
            .collect())
    }

    async fn list_following(&self, follower_id: Uuid) -> anyhow::Result<Vec<User>> {
        let ids = self.following_ids(follower_id).await?;
        self.find_many(&ids).await
    }

    async fn list_followers(&self, followed_id: Uuid) -> anyhow::Result<Vec<User>> {
        let ids: Vec<Uuid> = {
            let st = self.state.lock().unwrap();
            st.follows
                .iter()
                .filter(|f| f.user_being_followed_id == followed_id)
                .map(|f| f.user_following_id)
                .collect()
        };
        self.find_many(&ids).await
    }

    async fn count_following(&self, follower_id: Uuid) -> anyhow::Result<i64> {
        Ok(self.following_ids(follower_id).await?.len() as i64)
    }

    async fn count_followers(&self, followed_id: Uuid) -> anyhow::Result<i64> {
        Ok(self.list_followers(followed_id).await?.len() as i64)
    }
}

#[async_trait]
impl LikesRepository for MemoryStore {
    async fn toggle(&self, user_id: Uuid, message_id: Uuid) -> Result<LikeToggle, LikeWriteError> {
        let mut st = self.state.lock().unwrap();
        if !st.messages.iter().any(|m| m.id == message_id) {
            return Err(LikeWriteError::MissingMessage);
        }
        let before = st.likes.len();
        st.likes
            .retain(|l| !(l.user_id == user_id && l.message_id == message_id));
        if st.likes.len() < before {
            return Ok(LikeToggle::Removed);
        }
        st.likes.push(Like {
            id: Uuid::new_v4(),
            user_id,
            message_id,
        });
        Ok(LikeToggle::Added)
    }

    async fn find(&self, user_id: Uuid, message_id: Uuid) -> anyhow::Result<Option<Like>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .likes
            .iter()
            .find(|l| l.user_id == user_id && l.message_id == message_id)
            .cloned())
    }

    async fn liked_messages(&self, user_id: Uuid) -> anyhow::Result<Vec<Message>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Message> = st
            .likes
            .iter()
            .filter(|l| l.user_id == user_id)
            .filter_map(|l| st.messages.iter().find(|m| m.id == l.message_id).cloned())
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(out)
    }

    async fn count_for_user(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.likes.iter().filter(|l| l.user_id == user_id).count() as i64)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(
        &self,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<UserSession> {
        let mut st = self.state.lock().unwrap();
        anyhow::ensure!(
            st.users.iter().any(|(u, _)| u.id == user_id),
            "foreign key violation on sessions.user_id"
        );
        let session = UserSession {
            id: Uuid::new_v4(),
            user_id,
            expires_at,
        };
        st.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active(&self, id: Uuid) -> anyhow::Result<Option<UserSession>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .sessions
            .iter()
            .find(|s| s.id == id && !s.is_expired_at(Utc::now()))
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.sessions.len();
        st.sessions.retain(|s| s.id != id);
        Ok(st.sessions.len() < before)
    }
}

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: "postgres://localhost/warbler-test".into(),
        session_secret: DEV_SESSION_SECRET.into(),
        session_expires_secs: 3600,
        is_production: false,
    }
}

pub fn context(store: &MemoryStore) -> AppContext {
    let services = AppServices::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    AppContext::new(test_config(), services)
}

pub async fn signup(store: &MemoryStore, username: &str, email: &str, password: &str) -> User {
    let uc = Signup { repo: store };
    uc.execute(&SignupRequest {
        username: username.into(),
        email: email.into(),
        password: password.into(),
        image_url: None,
    })
    .await
    .expect("signup succeeds")
}

/// Seeds a user whose password is `SEED_PASSWORD`.
pub fn seed_user(store: &MemoryStore, username: &str) -> User {
    store.insert_raw_user(username, &format!("{username}@test.com"), &SEED_HASH)
}
