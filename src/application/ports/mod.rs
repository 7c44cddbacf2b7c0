pub mod friend_request_repository;
pub mod rate_limiter;
pub mod token_repository;
pub mod user_repository;
