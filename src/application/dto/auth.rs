use crate::domain::users::user::User;

/// A user together with the token the client should present from now on.
#[derive(Debug, Clone)]
pub struct AuthenticatedDto {
    pub token: String,
    pub user: User,
}
