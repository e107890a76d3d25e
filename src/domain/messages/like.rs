use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Added,
    Removed,
}
