use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::domain::friend_requests::friend_request::{FriendRequest, FriendRequestStatus};

pub struct ListPendingRequests<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

impl<'a, F: FriendRequestRepository + ?Sized> ListPendingRequests<'a, F> {
    pub async fn execute(&self, recipient_id: i64) -> anyhow::Result<Vec<FriendRequest>> {
        self.requests
            .list_received(recipient_id, FriendRequestStatus::Pending)
            .await
    }
}
