use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::validation::{self, ValidationErrors};
use crate::domain::friend_requests::friend_request::FriendRequest;
use crate::domain::users::user::User;

#[derive(thiserror::Error, Debug)]
pub enum SendFriendRequestError {
    #[error("invalid friend request: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn already_exists() -> SendFriendRequestError {
    SendFriendRequestError::Invalid(ValidationErrors::non_field("Friend request already exists."))
}

pub struct SendFriendRequest<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FriendRequestRepository + ?Sized,
{
    pub users: &'a U,
    pub requests: &'a F,
}

impl<'a, U, F> SendFriendRequest<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FriendRequestRepository + ?Sized,
{
    /// `to_user` is the raw primary key from the request body. New requests
    /// always start out pending.
    pub async fn execute(
        &self,
        sender: &User,
        to_user: Option<&serde_json::Value>,
    ) -> Result<FriendRequest, SendFriendRequestError> {
        let mut errors = ValidationErrors::new();
        let Some(to_id) = validation::required_pk(&mut errors, "to_user", to_user) else {
            return Err(SendFriendRequestError::Invalid(errors));
        };
        let Some(recipient) = self.users.find_by_id(to_id).await? else {
            return Err(SendFriendRequestError::Invalid(ValidationErrors::field(
                "to_user",
                validation::missing_pk_message(&to_id.to_string()),
            )));
        };
        if recipient.id == sender.id {
            return Err(SendFriendRequestError::Invalid(ValidationErrors::non_field(
                "You cannot send a friend request to yourself.",
            )));
        }
        if self.requests.exists(sender.id, recipient.id).await? {
            return Err(already_exists());
        }
        let created = self
            .requests
            .create(sender.id, recipient.id)
            .await?
            .ok_or_else(already_exists)?;
        tracing::info!(
            request_id = created.id,
            from_user = sender.id,
            to_user = recipient.id,
            "friend_request_sent"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::friend_requests::friend_request::FriendRequestStatus;
    use crate::test_support::InMemoryStore;
    use serde_json::json;

    fn non_field(err: SendFriendRequestError) -> Vec<String> {
        match err {
            SendFriendRequestError::Invalid(errors) => {
                errors.get("non_field_errors").unwrap_or_default().to_vec()
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sends_pending_request() {
        let store = InMemoryStore::new();
        let a = store.seed_user("a@example.com", "A", "pw").await;
        let b = store.seed_user("b@example.com", "B", "pw").await;
        let uc = SendFriendRequest {
            users: &store,
            requests: &store,
        };
        let req = uc.execute(&a, Some(&json!(b.id))).await.unwrap();
        assert_eq!(req.from_user.id, a.id);
        assert_eq!(req.to_user.id, b.id);
        assert_eq!(req.status, FriendRequestStatus::Pending);
    }

    #[tokio::test]
    async fn refuses_self_and_duplicate_requests() {
        let store = InMemoryStore::new();
        let a = store.seed_user("a@example.com", "A", "pw").await;
        let b = store.seed_user("b@example.com", "B", "pw").await;
        let uc = SendFriendRequest {
            users: &store,
            requests: &store,
        };

        let err = uc.execute(&a, Some(&json!(a.id))).await.unwrap_err();
        assert_eq!(non_field(err), ["You cannot send a friend request to yourself."]);

        uc.execute(&a, Some(&json!(b.id))).await.unwrap();
        let err = uc.execute(&a, Some(&json!(b.id))).await.unwrap_err();
        assert_eq!(non_field(err), ["Friend request already exists."]);

        // the reverse direction is a separate request
        assert!(uc.execute(&b, Some(&json!(a.id))).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_recipient_is_a_field_error() {
        let store = InMemoryStore::new();
        let a = store.seed_user("a@example.com", "A", "pw").await;
        let uc = SendFriendRequest {
            users: &store,
            requests: &store,
        };
        match uc.execute(&a, Some(&json!(999))).await.unwrap_err() {
            SendFriendRequestError::Invalid(errors) => assert_eq!(
                errors.get("to_user").unwrap(),
                ["Invalid pk \"999\" - object does not exist."]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
