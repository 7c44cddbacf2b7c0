use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::user_from_row;
use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::domain::friend_requests::friend_request::{FriendRequest, FriendRequestStatus};
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;

const SELECT_REQUESTS: &str = r#"
    SELECT fr.id, fr.status, fr.created_at,
           f.id AS from_id, f.email AS from_email, f.name AS from_name,
           f.is_active AS from_is_active, f.is_staff AS from_is_staff,
           f.is_superuser AS from_is_superuser, f.created_at AS from_created_at,
           t.id AS to_id, t.email AS to_email, t.name AS to_name,
           t.is_active AS to_is_active, t.is_staff AS to_is_staff,
           t.is_superuser AS to_is_superuser, t.created_at AS to_created_at
    FROM friend_requests fr
    JOIN users f ON f.id = fr.from_user_id
    JOIN users t ON t.id = fr.to_user_id"#;

pub struct SqlxFriendRequestRepository {
    pub pool: PgPool,
}

impl SqlxFriendRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn request_from_row(row: &PgRow) -> anyhow::Result<FriendRequest> {
    let status: String = row.get("status");
    Ok(FriendRequest {
        id: row.get("id"),
        from_user: user_from_row(row, "from_"),
        to_user: user_from_row(row, "to_"),
        status: status.parse()?,
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl FriendRequestRepository for SqlxFriendRequestRepository {
    async fn create(&self, from_user: i64, to_user: i64) -> anyhow::Result<Option<FriendRequest>> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO friend_requests (from_user_id, to_user_id, status)
               VALUES ($1, $2, $3)
               ON CONFLICT (from_user_id, to_user_id) DO NOTHING
               RETURNING id"#,
        )
        .bind(from_user)
        .bind(to_user)
        .bind(FriendRequestStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?;
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn exists(&self, from_user: i64, to_user: i64) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM friend_requests WHERE from_user_id = $1 AND to_user_id = $2
               )"#,
        )
        .bind(from_user)
        .bind(to_user)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<FriendRequest>> {
        let row = sqlx::query(&format!("{SELECT_REQUESTS} WHERE fr.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(request_from_row).transpose()
    }

    async fn update_status(
        &self,
        id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Option<FriendRequest>> {
        let res = sqlx::query("UPDATE friend_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM friend_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_involving(&self, user_id: i64) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*)::BIGINT FROM friend_requests
               WHERE from_user_id = $1 OR to_user_id = $1"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list_involving(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FriendRequest>> {
        let rows = sqlx::query(&format!(
            "{SELECT_REQUESTS} WHERE fr.from_user_id = $1 OR fr.to_user_id = $1 ORDER BY fr.id ASC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(request_from_row).collect()
    }

    async fn list_received(
        &self,
        user_id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Vec<FriendRequest>> {
        let rows = sqlx::query(&format!(
            "{SELECT_REQUESTS} WHERE fr.to_user_id = $1 AND fr.status = $2 ORDER BY fr.id ASC"
        ))
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(request_from_row).collect()
    }

    async fn list_friends(&self, user_id: i64) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.email, u.name, u.is_active, u.is_staff, u.is_superuser, u.created_at
               FROM users u
               WHERE u.id IN (
                   SELECT to_user_id FROM friend_requests
                   WHERE from_user_id = $1 AND status = $2
                   UNION
                   SELECT from_user_id FROM friend_requests
                   WHERE to_user_id = $1 AND status = $2
               )
               ORDER BY u.id ASC"#,
        )
        .bind(user_id)
        .bind(FriendRequestStatus::Accepted.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(|r| user_from_row(r, "")).collect())
    }
}
