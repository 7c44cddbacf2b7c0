use crate::application::ports::token_repository::TokenRepository;
use crate::domain::users::user::User;

#[derive(thiserror::Error, Debug)]
pub enum TokenAuthError {
    #[error("Invalid token.")]
    InvalidToken,
    #[error("User inactive or deleted.")]
    Inactive,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Resolves a presented token key to its (active) owner.
pub struct AuthenticateToken<'a, T: TokenRepository + ?Sized> {
    pub tokens: &'a T,
}

impl<'a, T: TokenRepository + ?Sized> AuthenticateToken<'a, T> {
    pub async fn execute(&self, key: &str) -> Result<User, TokenAuthError> {
        let user = self
            .tokens
            .find_user_by_key(key)
            .await?
            .ok_or(TokenAuthError::InvalidToken)?;
        if !user.is_active {
            return Err(TokenAuthError::Inactive);
        }
        Ok(user)
    }
}
