use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::ports::session_repository::SessionRepository;
use crate::domain::users::session::UserSession;

pub struct StartSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<'a, R> StartSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, ttl_secs: i64) -> anyhow::Result<UserSession> {
        let expires_at = Utc::now() + Duration::seconds(ttl_secs.max(0));
        let session = self.repo.create(user_id, expires_at).await?;
        tracing::debug!(session_id = %session.id, user_id = %user_id, "session_started");
        Ok(session)
    }
}

/// Maps a presented session id back to its user. The claimed user must match
/// the stored row, so a token cannot be replayed against another account.
pub struct ResolveSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<'a, R> ResolveSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    pub async fn execute(&self, session_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let found = self.repo.find_active(session_id).await?;
        Ok(found
            .filter(|s| s.user_id == user_id && !s.is_expired_at(Utc::now()))
            .map(|s| s.user_id))
    }
}

pub struct EndSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<'a, R> EndSession<'a, R>
where
    R: SessionRepository + ?Sized,
{
    /// Returns false when the session was already gone.
    pub async fn execute(&self, session_id: Uuid) -> anyhow::Result<bool> {
        let deleted = self.repo.delete(session_id).await?;
        if deleted {
            tracing::debug!(session_id = %session_id, "session_ended");
        }
        Ok(deleted)
    }
}
