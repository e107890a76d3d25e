use uuid::Uuid;

use crate::application::dto::users::ProfileDto;
use crate::application::ports::follows_repository::FollowsRepository;
use crate::application::ports::likes_repository::LikesRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::user_repository::UserRepository;

pub const PROFILE_MESSAGE_LIMIT: i64 = 100;

pub struct GetProfile<'a, U, M, F, L>
where
    U: UserRepository + ?Sized,
    M: MessageRepository + ?Sized,
    F: FollowsRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub users: &'a U,
    pub messages: &'a M,
    pub follows: &'a F,
    pub likes: &'a L,
}

impl<'a, U, M, F, L> GetProfile<'a, U, M, F, L>
where
    U: UserRepository + ?Sized,
    M: MessageRepository + ?Sized,
    F: FollowsRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<ProfileDto>> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(None);
        };
        let messages = self
            .messages
            .list_for_user(user_id, PROFILE_MESSAGE_LIMIT)
            .await?;
        Ok(Some(ProfileDto {
            user,
            messages,
            message_count: self.messages.count_for_user(user_id).await?,
            following_count: self.follows.count_following(user_id).await?,
            followers_count: self.follows.count_followers(user_id).await?,
            likes_count: self.likes.count_for_user(user_id).await?,
        }))
    }
}
