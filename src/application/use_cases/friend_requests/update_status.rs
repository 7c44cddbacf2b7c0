use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::application::validation::ValidationErrors;
use crate::domain::friend_requests::friend_request::{FriendRequest, FriendRequestStatus};

#[derive(thiserror::Error, Debug)]
pub enum UpdateFriendRequestError {
    #[error("friend request not found")]
    NotFound,
    #[error("invalid status update: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Lets the recipient accept or reject a request.
pub struct UpdateFriendRequestStatus<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

fn parse_status(
    value: Option<&serde_json::Value>,
    partial: bool,
) -> Result<Option<FriendRequestStatus>, ValidationErrors> {
    match value {
        None if partial => Ok(None),
        None => Err(ValidationErrors::field("status", "This field is required.")),
        Some(serde_json::Value::Null) => {
            Err(ValidationErrors::field("status", "This field may not be null."))
        }
        Some(serde_json::Value::String(s)) => s
            .parse::<FriendRequestStatus>()
            .map(Some)
            .map_err(|e| ValidationErrors::field("status", e.to_string())),
        Some(other) => Err(ValidationErrors::field(
            "status",
            format!("\"{}\" is not a valid choice.", other),
        )),
    }
}

impl<'a, F: FriendRequestRepository + ?Sized> UpdateFriendRequestStatus<'a, F> {
    /// With `partial`, a missing status leaves the request unchanged.
    pub async fn execute(
        &self,
        actor_id: i64,
        request_id: i64,
        status: Option<&serde_json::Value>,
        partial: bool,
    ) -> Result<FriendRequest, UpdateFriendRequestError> {
        let current = self
            .requests
            .find_by_id(request_id)
            .await?
            .filter(|r| r.involves(actor_id))
            .ok_or(UpdateFriendRequestError::NotFound)?;
        let status = parse_status(status, partial).map_err(UpdateFriendRequestError::Invalid)?;
        if current.to_user.id != actor_id {
            return Err(UpdateFriendRequestError::Invalid(ValidationErrors::non_field(
                "You can only accept or reject requests sent to you.",
            )));
        }
        let Some(status) = status else {
            return Ok(current);
        };
        let updated = self
            .requests
            .update_status(request_id, status)
            .await?
            .ok_or(UpdateFriendRequestError::NotFound)?;
        tracing::info!(request_id, status = %status, "friend_request_status_changed");
        Ok(updated)
    }
}
