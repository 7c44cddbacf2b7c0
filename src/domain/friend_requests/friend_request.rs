use std::fmt;
use std::str::FromStr;

use crate::domain::users::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub const ALL: [FriendRequestStatus; 3] = [
        FriendRequestStatus::Pending,
        FriendRequestStatus::Accepted,
        FriendRequestStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
            FriendRequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidStatus(pub String);

impl FromStr for FriendRequestStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct FriendRequest {
    pub id: i64,
    pub from_user: User,
    pub to_user: User,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendRequest {
    pub fn involves(&self, user_id: i64) -> bool {
        self.from_user.id == user_id || self.to_user.id == user_id
    }
}
