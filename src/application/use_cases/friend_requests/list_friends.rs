use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::domain::users::user::User;

pub struct ListFriends<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

impl<'a, F: FriendRequestRepository + ?Sized> ListFriends<'a, F> {
    pub async fn execute(&self, user_id: i64) -> anyhow::Result<Vec<User>> {
        self.requests.list_friends(user_id).await
    }
}
