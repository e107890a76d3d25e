use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::message_repository::MessageRepository;

pub struct DeleteMessage<'a, R: MessageRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteMessageError {
    #[error("Message not found.")]
    NotFound,
    #[error("Access unauthorized.")]
    NotOwner,
    #[error("failed to delete message")]
    Storage(#[from] anyhow::Error),
}

impl<'a, R: MessageRepository + ?Sized> DeleteMessage<'a, R> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), DeleteMessageError> {
        let message = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DeleteMessageError::NotFound)?;
        if !access::owns_message(&Actor::User(user_id), &message) {
            return Err(DeleteMessageError::NotOwner);
        }
        if !self.repo.delete_owned(id, user_id).await? {
            return Err(DeleteMessageError::NotFound);
        }
        Ok(())
    }
}
