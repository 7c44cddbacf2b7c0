use crate::application::ports::user_repository::UserRepository;
use crate::application::services::password::hash_password;
use crate::domain::users::user::{AccountFlags, User};

/// Creates a staff account with every privilege flag set.
pub struct CreateSuperuser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CreateSuperuser<'a, R> {
    pub async fn execute(&self, email: &str, name: &str, password: &str) -> anyhow::Result<User> {
        let email = email.trim().to_lowercase();
        anyhow::ensure!(!email.is_empty(), "Email must be provided");
        let hash = hash_password(password)?;
        self.repo
            .create_user(&email, name.trim(), &hash, AccountFlags::SUPERUSER)
            .await?
            .ok_or_else(|| anyhow::anyhow!("a user with email {} already exists", email))
    }
}
