use std::sync::Arc;

use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::application::ports::rate_limiter::RateLimiter;
use crate::application::ports::token_repository::TokenRepository;
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
    token_repo: Arc<dyn TokenRepository>,
    friend_request_repo: Arc<dyn FriendRequestRepository>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn TokenRepository>,
        friend_request_repo: Arc<dyn FriendRequestRepository>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            friend_request_repo,
            rate_limiter,
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

    pub fn token_repo(&self) -> Arc<dyn TokenRepository> {
        self.services.token_repo.clone()
    }

    pub fn friend_request_repo(&self) -> Arc<dyn FriendRequestRepository> {
        self.services.friend_request_repo.clone()
    }

    pub fn rate_limiter(&self) -> Arc<dyn RateLimiter> {
        self.services.rate_limiter.clone()
    }
}
