use std::collections::HashMap;

use uuid::Uuid;

use crate::application::dto::messages::MessageWithAuthorDto;
use crate::application::ports::follows_repository::FollowsRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::user_repository::UserRepository;

pub const TIMELINE_LIMIT: i64 = 100;

pub struct HomeTimeline<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessageRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    pub users: &'a U,
    pub messages: &'a M,
    pub follows: &'a F,
}

impl<'a, U, M, F> HomeTimeline<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessageRepository + ?Sized,
    F: FollowsRepository + ?Sized,
{
    /// Latest messages by the user and everyone they follow, newest first.
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<MessageWithAuthorDto>> {
        let mut authors = self.follows.following_ids(user_id).await?;
        authors.push(user_id);

        let messages = self
            .messages
            .list_by_authors(&authors, TIMELINE_LIMIT)
            .await?;
        let by_id: HashMap<Uuid, _> = self
            .users
            .find_many(&authors)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(messages
            .into_iter()
            .filter_map(|message| {
                let author = by_id.get(&message.user_id)?.clone();
                Some(MessageWithAuthorDto { message, author })
            })
            .collect())
    }
}
