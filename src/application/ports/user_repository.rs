use async_trait::async_trait;

use crate::domain::users::user::{AccountFlags, User, UserFilter};

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `None` when the email is already taken.
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        flags: AccountFlags,
    ) -> anyhow::Result<Option<User>>;
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    async fn find_credentials_by_email(&self, email: &str)
    -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn count_users(&self, filter: &UserFilter) -> anyhow::Result<i64>;
    async fn list_users(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>>;
}
