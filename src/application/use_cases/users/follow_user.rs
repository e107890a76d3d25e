use uuid::Uuid;

use crate::application::ports::follows_repository::FollowsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::follow::Follow;

pub struct FollowUser<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    pub users: &'a U,
    pub follows: &'a F,
}

#[derive(thiserror::Error, Debug)]
pub enum FollowError {
    #[error("You cannot follow yourself.")]
    SelfFollow,
    #[error("User not found.")]
    NotFound,
    #[error("failed to update follows")]
    Storage(#[from] anyhow::Error),
}

impl<'a, U, F> FollowUser<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    pub async fn execute(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), FollowError> {
        let follow = Follow::new(follower_id, followed_id);
        if follow.is_self_follow() {
            return Err(FollowError::SelfFollow);
        }
        if self.users.find_by_id(followed_id).await?.is_none() {
            return Err(FollowError::NotFound);
        }
        let created = self.follows.add(follow).await?;
        tracing::debug!(%follower_id, %followed_id, created, "follow_added");
        Ok(())
    }
}
