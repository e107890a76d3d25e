use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;

#[derive(thiserror::Error, Debug)]
pub enum DeleteAccountError {
    #[error("User not found.")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct DeleteAccount<'a, UR>
where
    UR: UserRepository + ?Sized,
{
    pub user_repo: &'a UR,
}

impl<'a, UR> DeleteAccount<'a, UR>
where
    UR: UserRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError> {
        if !self.user_repo.delete_user(user_id).await? {
            return Err(DeleteAccountError::NotFound);
        }
        tracing::info!(user_id = %user_id, "account_deleted");
        Ok(())
    }
}
