use crate::domain::messages::message::Message;
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct MessageWithAuthorDto {
    pub message: Message,
    pub author: User,
}
