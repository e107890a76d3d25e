use uuid::Uuid;

use crate::application::dto::messages::MessageWithAuthorDto;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct GetMessage<'a, M, U>
where
    M: MessageRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub messages: &'a M,
    pub users: &'a U,
}

impl<'a, M, U> GetMessage<'a, M, U>
where
    M: MessageRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<MessageWithAuthorDto>> {
        let Some(message) = self.messages.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = self
            .users
            .find_by_id(message.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("message {} has no author row", message.id))?;
        Ok(Some(MessageWithAuthorDto { message, author }))
    }
}
