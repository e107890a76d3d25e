use uuid::Uuid;

use crate::application::ports::likes_repository::LikesRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::messages::message::Message;
use crate::domain::users::user::User;

pub struct ListLikes<'a, U, L>
where
    U: UserRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub users: &'a U,
    pub likes: &'a L,
}

impl<'a, U, L> ListLikes<'a, U, L>
where
    U: UserRepository + ?Sized,
    L: LikesRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<(User, Vec<Message>)>> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(None);
        };
        let liked = self.likes.liked_messages(user_id).await?;
        Ok(Some((user, liked)))
    }
}
