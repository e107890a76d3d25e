use uuid::Uuid;

use crate::application::ports::message_repository::MessageRepository;
use crate::domain::messages::message::{Message, MessageError, NewMessage};

pub struct CreateMessage<'a, R: MessageRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(thiserror::Error, Debug)]
pub enum CreateMessageError {
    #[error(transparent)]
    Invalid(#[from] MessageError),
    #[error("failed to store message")]
    Storage(#[source] anyhow::Error),
}

impl<'a, R: MessageRepository + ?Sized> CreateMessage<'a, R> {
    pub async fn execute(
        &self,
        user_id: Option<Uuid>,
        text: &str,
    ) -> Result<Message, CreateMessageError> {
        let draft = NewMessage {
            text: text.to_string(),
            user_id,
        }
        .validate()?;
        let msg = self
            .repo
            .create(&draft)
            .await
            .map_err(CreateMessageError::Storage)?;
        tracing::debug!(message_id = %msg.id, user_id = %msg.user_id, "message_created");
        Ok(msg)
    }
}
