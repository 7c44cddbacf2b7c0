use async_trait::async_trait;

use crate::domain::users::user::User;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the user's token, issuing one if none exists yet.
    async fn get_or_create(&self, user_id: i64) -> anyhow::Result<String>;
    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>>;
}
