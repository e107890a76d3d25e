use crate::domain::messages::message::Message;
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct ProfileDto {
    pub user: User,
    /// Newest first.
    pub messages: Vec<Message>,
    pub message_count: i64,
    pub following_count: i64,
    pub followers_count: i64,
    pub likes_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationshipDto {
    pub is_following: bool,
    pub is_followed_by: bool,
}
