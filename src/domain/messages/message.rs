use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MAX_MESSAGE_LEN: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Unvalidated input for a new message. `user_id` stays optional here so a
/// missing owner is caught before anything reaches storage.
#[derive(Debug, Clone, Default)]
pub struct NewMessage {
    pub text: String,
    pub user_id: Option<Uuid>,
}

/// A message that passed validation and can be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub text: String,
    pub user_id: Uuid,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("a message must belong to a user")]
    MissingOwner,
    #[error("message text is required")]
    EmptyText,
    #[error("message text is limited to {MAX_MESSAGE_LEN} characters (got {0})")]
    TooLong(usize),
}

impl NewMessage {
    pub fn validate(self) -> Result<MessageDraft, MessageError> {
        let user_id = self.user_id.ok_or(MessageError::MissingOwner)?;
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(MessageError::EmptyText);
        }
        let len = text.chars().count();
        if len > MAX_MESSAGE_LEN {
            return Err(MessageError::TooLong(len));
        }
        Ok(MessageDraft { text, user_id })
    }
}
