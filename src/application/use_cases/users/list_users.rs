use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> anyhow::Result<Vec<User>> {
        let search = search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        self.repo.list(search).await
    }
}
