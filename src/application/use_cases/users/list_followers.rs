use uuid::Uuid;

use crate::application::ports::follows_repository::FollowsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ListFollowers<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    pub users: &'a U,
    pub follows: &'a F,
}

impl<'a, U, F> ListFollowers<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<(User, Vec<User>)>> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(None);
        };
        let followers = self.follows.list_followers(user_id).await?;
        Ok(Some((user, followers)))
    }
}
