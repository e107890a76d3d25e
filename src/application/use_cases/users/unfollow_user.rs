use uuid::Uuid;

use crate::application::ports::follows_repository::FollowsRepository;
use crate::domain::users::follow::Follow;

pub struct UnfollowUser<'a, F: FollowsRepository + ?Sized> {
    pub follows: &'a F,
}

impl<'a, F: FollowsRepository + ?Sized> UnfollowUser<'a, F> {
    /// Removing an edge that does not exist is not an error.
    pub async fn execute(&self, follower_id: Uuid, followed_id: Uuid) -> anyhow::Result<bool> {
        self.follows
            .remove(Follow::new(follower_id, followed_id))
            .await
    }
}
