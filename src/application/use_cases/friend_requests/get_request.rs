use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::domain::friend_requests::friend_request::FriendRequest;

/// Only the sender and the recipient can see a request.
pub struct GetFriendRequest<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

impl<'a, F: FriendRequestRepository + ?Sized> GetFriendRequest<'a, F> {
    pub async fn execute(&self, actor_id: i64, id: i64) -> anyhow::Result<Option<FriendRequest>> {
        Ok(self
            .requests
            .find_by_id(id)
            .await?
            .filter(|r| r.involves(actor_id)))
    }
}
