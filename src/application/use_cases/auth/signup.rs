use crate::application::dto::auth::AuthenticatedDto;
use crate::application::ports::token_repository::TokenRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::password::hash_password;
use crate::application::validation::{self, TextRule, ValidationErrors};
use crate::domain::users::user::AccountFlags;

pub const EMAIL_MAX_LENGTH: usize = 254;
pub const NAME_MAX_LENGTH: usize = 100;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub struct Signup<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
{
    pub users: &'a U,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl SignupRequest {
    pub fn parse(
        email: Option<&str>,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = validation::required_email(&mut errors, "email", email, EMAIL_MAX_LENGTH);
        let name = validation::required_text(
            &mut errors,
            "name",
            name,
            TextRule {
                max_length: NAME_MAX_LENGTH,
                trim: true,
            },
        );
        let password = validation::required_text(
            &mut errors,
            "password",
            password,
            TextRule {
                max_length: PASSWORD_MAX_LENGTH,
                trim: false,
            },
        );
        match (email, name, password) {
            (Some(email), Some(name), Some(password)) if errors.is_empty() => Ok(Self {
                email,
                name,
                password,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SignupError {
    #[error("invalid signup: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn email_taken() -> SignupError {
    SignupError::Invalid(ValidationErrors::field(
        "email",
        "user with this email already exists.",
    ))
}

impl<'a, U, T> Signup<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
{
    pub async fn execute(&self, req: &SignupRequest) -> Result<AuthenticatedDto, SignupError> {
        let email = req.email.to_lowercase();
        if self.users.email_exists(&email).await? {
            return Err(email_taken());
        }
        let hash = hash_password(&req.password)?;
        // A concurrent signup can still win the race; the insert reports it.
        let user = self
            .users
            .create_user(&email, &req.name, &hash, AccountFlags::REGULAR)
            .await?
            .ok_or_else(email_taken)?;
        let token = self.tokens.get_or_create(user.id).await?;
        tracing::info!(user_id = user.id, "user_signed_up");
        Ok(AuthenticatedDto { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;

    fn request(email: &str) -> SignupRequest {
        SignupRequest::parse(Some(email), Some("Alice"), Some("s3cret-pass")).unwrap()
    }

    #[tokio::test]
    async fn signup_lowercases_email_and_issues_token() {
        let store = InMemoryStore::new();
        let uc = Signup {
            users: &store,
            tokens: &store,
        };
        let out = uc.execute(&request("Alice@Example.COM")).await.unwrap();
        assert_eq!(out.user.email, "alice@example.com");
        assert_eq!(out.token.len(), 40);
        assert_eq!(store.token_for(out.user.id), Some(out.token));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_field_error() {
        let store = InMemoryStore::new();
        let uc = Signup {
            users: &store,
            tokens: &store,
        };
        uc.execute(&request("alice@example.com")).await.unwrap();
        let err = uc.execute(&request("ALICE@example.com")).await.unwrap_err();
        match err {
            SignupError::Invalid(errors) => assert_eq!(
                errors.get("email").unwrap(),
                ["user with this email already exists."]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_collects_every_field_error() {
        let errors = SignupRequest::parse(Some("nope"), None, Some("")).unwrap_err();
        assert_eq!(errors.get("email").unwrap(), ["Enter a valid email address."]);
        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
        assert_eq!(errors.get("password").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn parse_enforces_name_length() {
        let long = "x".repeat(NAME_MAX_LENGTH + 1);
        let errors = SignupRequest::parse(Some("a@example.com"), Some(&long), Some("pw"))
            .unwrap_err();
        assert_eq!(
            errors.get("name").unwrap(),
            ["Ensure this field has no more than 100 characters."]
        );
    }
}
