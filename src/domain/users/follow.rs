use uuid::Uuid;

/// Directed edge: `user_following_id` follows `user_being_followed_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follow {
    pub user_being_followed_id: Uuid,
    pub user_following_id: Uuid,
}

impl Follow {
    pub fn new(follower: Uuid, followed: Uuid) -> Self {
        Self {
            user_being_followed_id: followed,
            user_following_id: follower,
        }
    }

    pub fn is_self_follow(&self) -> bool {
        self.user_being_followed_id == self.user_following_id
    }
}
