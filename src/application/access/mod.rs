use uuid::Uuid;

use crate::domain::messages::message::Message;

/// Per-request session state. Login moves a client to `User`, logout back
/// to `Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Actor {
    #[default]
    Anonymous,
    User(Uuid),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Access unauthorized.")]
pub struct Unauthorized;

impl Actor {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::User(id) => Some(*id),
            Actor::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User(_))
    }

    pub fn require_user(&self) -> Result<Uuid, Unauthorized> {
        self.user_id().ok_or(Unauthorized)
    }
}

// Presentation layer is responsible for building Actor from HTTP inputs.

pub fn owns_message(actor: &Actor, message: &Message) -> bool {
    actor.user_id() == Some(message.user_id)
}

pub fn can_like(actor: &Actor, message: &Message) -> bool {
    actor.is_authenticated() && !owns_message(actor, message)
}
