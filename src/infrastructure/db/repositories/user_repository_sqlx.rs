use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use super::user_from_row;
use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::domain::users::user::{AccountFlags, User, UserFilter};
use crate::infrastructure::db::PgPool;

const USER_COLUMNS: &str = "id, email, name, is_active, is_staff, is_superuser, created_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE metacharacters so user input only matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    match filter {
        UserFilter::All => {}
        UserFilter::EmailIs(email) => {
            qb.push(" WHERE lower(email) = lower(")
                .push_bind(email.clone())
                .push(")");
        }
        UserFilter::NameContains(part) => {
            qb.push(" WHERE name ILIKE ")
                .push_bind(format!("%{}%", escape_like(part)))
                .push(" ESCAPE '\\'");
        }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        flags: AccountFlags,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO users (email, name, password_hash, is_active, is_staff, is_superuser)
               VALUES ($1, $2, $3, $4, $5, $6)
               ON CONFLICT (email) DO NOTHING
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(flags.is_active)
        .bind(flags.is_staff)
        .bind(flags.is_superuser)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| user_from_row(&r, "")))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| UserCredentials {
            user: user_from_row(&r, ""),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| user_from_row(&r, "")))
    }

    async fn count_users(&self, filter: &UserFilter) -> anyhow::Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*)::BIGINT FROM users");
        push_filter(&mut qb, filter);
        let count = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list_users(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(|r| user_from_row(r, "")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
