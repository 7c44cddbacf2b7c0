use crate::application::dto::auth::AuthenticatedDto;
use crate::application::ports::token_repository::TokenRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::password::verify_password;
use crate::application::validation::{self, TextRule, ValidationErrors};

pub struct Login<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
{
    pub users: &'a U,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn parse(email: Option<&str>, password: Option<&str>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = validation::required_email(&mut errors, "email", email, 254);
        let password = validation::required_text(
            &mut errors,
            "password",
            password,
            TextRule {
                max_length: usize::MAX,
                trim: false,
            },
        );
        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Self { email, password }),
            _ => Err(errors),
        }
    }
}

impl<'a, U, T> Login<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
{
    /// `None` when the credentials do not match an active account.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<AuthenticatedDto>> {
        let email = req.email.to_lowercase();
        let creds = match self.users.find_credentials_by_email(&email).await? {
            Some(c) => c,
            None => return Ok(None),
        };
        if !creds.user.is_active || !verify_password(&req.password, &creds.password_hash) {
            return Ok(None);
        }
        let token = self.tokens.get_or_create(creds.user.id).await?;
        Ok(Some(AuthenticatedDto {
            token,
            user: creds.user,
        }))
    }
}
