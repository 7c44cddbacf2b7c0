use async_trait::async_trait;

use super::user_from_row;
use crate::application::ports::token_repository::TokenRepository;
use crate::domain::users::user::User;
use crate::infrastructure::crypto::generate_token_key;
use crate::infrastructure::db::PgPool;

pub struct SqlxTokenRepository {
    pub pool: PgPool,
}

impl SqlxTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for SqlxTokenRepository {
    async fn get_or_create(&self, user_id: i64) -> anyhow::Result<String> {
        // One token per user: a concurrent insert loses on the unique user_id
        // and the existing key is read back.
        sqlx::query(
            r#"INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2)
               ON CONFLICT (user_id) DO NOTHING"#,
        )
        .bind(generate_token_key())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        let key = sqlx::query_scalar::<_, String>("SELECT key FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(key)
    }

    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT u.id, u.email, u.name, u.is_active, u.is_staff, u.is_superuser, u.created_at
               FROM auth_tokens t
               JOIN users u ON u.id = t.user_id
               WHERE t.key = $1"#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| user_from_row(&r, "")))
    }
}
