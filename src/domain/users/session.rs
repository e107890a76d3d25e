use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A login on the server side. Logging out deletes the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
