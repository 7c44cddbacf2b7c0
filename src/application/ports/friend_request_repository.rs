use async_trait::async_trait;

use crate::domain::friend_requests::friend_request::{FriendRequest, FriendRequestStatus};
use crate::domain::users::user::User;

#[async_trait]
pub trait FriendRequestRepository: Send + Sync {
    /// Inserts a pending request; `None` if the pair already exists.
    async fn create(&self, from_user: i64, to_user: i64) -> anyhow::Result<Option<FriendRequest>>;
    async fn exists(&self, from_user: i64, to_user: i64) -> anyhow::Result<bool>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<FriendRequest>>;
    async fn update_status(
        &self,
        id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Option<FriendRequest>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn count_involving(&self, user_id: i64) -> anyhow::Result<i64>;
    /// Requests sent or received by `user_id`, ordered by id.
    async fn list_involving(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FriendRequest>>;
    async fn list_received(
        &self,
        user_id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Vec<FriendRequest>>;
    /// Users connected to `user_id` by an accepted request in either direction.
    async fn list_friends(&self, user_id: i64) -> anyhow::Result<Vec<User>>;
}
