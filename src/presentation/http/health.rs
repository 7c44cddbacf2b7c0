use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answers, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses(
        (status = 200, body = HealthResp),
        (status = 503, body = HealthResp, description = "Database unreachable")
    )
)]
pub async fn health(State(pool): State<PgPool>) -> (StatusCode, Json<HealthResp>) {
    let db_ok = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = ?e, "health_db_check_failed");
            false
        }
    };
    let (code, status) = if db_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(HealthResp {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
