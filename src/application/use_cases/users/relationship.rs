use uuid::Uuid;

use crate::application::dto::users::RelationshipDto;
use crate::application::ports::follows_repository::FollowsRepository;
use crate::domain::users::follow::Follow;

pub struct Relationship<'a, R: FollowsRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FollowsRepository + ?Sized> Relationship<'a, R> {
    /// Does `user` follow `other`?
    pub async fn is_following(&self, user: Uuid, other: Uuid) -> anyhow::Result<bool> {
        self.repo.exists(Follow::new(user, other)).await
    }

    /// Is `user` followed by `other`?
    pub async fn is_followed_by(&self, user: Uuid, other: Uuid) -> anyhow::Result<bool> {
        self.is_following(other, user).await
    }

    pub async fn between(&self, user: Uuid, other: Uuid) -> anyhow::Result<RelationshipDto> {
        Ok(RelationshipDto {
            is_following: self.is_following(user, other).await?,
            is_followed_by: self.is_followed_by(user, other).await?,
        })
    }
}
