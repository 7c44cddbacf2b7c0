use crate::application::ports::friend_request_repository::FriendRequestRepository;

pub struct DeleteFriendRequest<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

impl<'a, F: FriendRequestRepository + ?Sized> DeleteFriendRequest<'a, F> {
    /// Returns false when the request is missing or the actor is not part of it.
    pub async fn execute(&self, actor_id: i64, id: i64) -> anyhow::Result<bool> {
        let Some(request) = self.requests.find_by_id(id).await? else {
            return Ok(false);
        };
        if !request.involves(actor_id) {
            return Ok(false);
        }
        self.requests.delete(id).await
    }
}
