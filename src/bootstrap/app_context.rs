use std::sync::Arc;

use crate::application::ports::follows_repository::FollowsRepository;
use crate::application::ports::likes_repository::LikesRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,
    follows_repo: Arc<dyn FollowsRepository>,
    likes_repo: Arc<dyn LikesRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        follows_repo: Arc<dyn FollowsRepository>,
        likes_repo: Arc<dyn LikesRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            message_repo,
            follows_repo,
            likes_repo,
            session_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn message_repo(&self) -> Arc<dyn MessageRepository> {
        self.services.message_repo.clone()
    }

    pub fn follows_repo(&self) -> Arc<dyn FollowsRepository> {
        self.services.follows_repo.clone()
    }

    pub fn likes_repo(&self) -> Arc<dyn LikesRepository> {
        self.services.likes_repo.clone()
    }

    pub fn session_repo(&self) -> Arc<dyn SessionRepository> {
        self.services.session_repo.clone()
    }
}
