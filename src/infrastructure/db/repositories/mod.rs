pub mod friend_request_repository_sqlx;
pub mod token_repository_sqlx;
pub mod user_repository_sqlx;

use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::domain::users::user::User;

/// Maps the user columns of a row, optionally prefixed (e.g. `from_`).
pub(crate) fn user_from_row(row: &PgRow, prefix: &str) -> User {
    let col = |name: &str| format!("{}{}", prefix, name);
    User {
        id: row.get(col("id").as_str()),
        email: row.get(col("email").as_str()),
        name: row.get(col("name").as_str()),
        is_active: row.get(col("is_active").as_str()),
        is_staff: row.get(col("is_staff").as_str()),
        is_superuser: row.get(col("is_superuser").as_str()),
        created_at: row.get(col("created_at").as_str()),
    }
}
