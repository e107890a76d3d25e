use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::likes_repository::{LikeWriteError, LikesRepository};
use crate::application::ports::message_repository::MessageRepository;
use crate::domain::messages::like::LikeToggle;

pub struct ToggleLike<'a, M, L>
where
    M: MessageRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub messages: &'a M,
    pub likes: &'a L,
}

#[derive(thiserror::Error, Debug)]
pub enum ToggleLikeError {
    #[error("You cannot like your own message.")]
    OwnMessage,
    #[error("Message not found.")]
    NotFound,
    #[error("failed to update likes")]
    Storage(#[from] anyhow::Error),
}

impl From<LikeWriteError> for ToggleLikeError {
    fn from(err: LikeWriteError) -> Self {
        match err {
            // Deleted between the lookup and the insert
            LikeWriteError::MissingMessage => ToggleLikeError::NotFound,
            LikeWriteError::Other(e) => ToggleLikeError::Storage(e),
        }
    }
}

impl<'a, M, L> ToggleLike<'a, M, L>
where
    M: MessageRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        message_id: Uuid,
    ) -> Result<LikeToggle, ToggleLikeError> {
        let message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(ToggleLikeError::NotFound)?;
        if !access::can_like(&Actor::User(user_id), &message) {
            tracing::debug!(%user_id, %message_id, "self_like_rejected");
            return Err(ToggleLikeError::OwnMessage);
        }
        let outcome = self.likes.toggle(user_id, message_id).await?;
        tracing::debug!(%user_id, %message_id, ?outcome, "like_toggled");
        Ok(outcome)
    }
}
