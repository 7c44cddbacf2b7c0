use axum::{Json, Router, extract::State, http::HeaderMap, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::links;

/// Entry points of the browsable API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiRootResponse {
    pub users: String,
    #[serde(rename = "friend-requests")]
    pub friend_requests: String,
}

#[utoipa::path(get, path = "/api/", tag = "Root", security(()),
    responses((status = 200, body = ApiRootResponse)))]
pub async fn api_root(State(ctx): State<AppContext>, headers: HeaderMap) -> Json<ApiRootResponse> {
    let base = links::base_url(&ctx.cfg, &headers);
    Json(ApiRootResponse {
        users: format!("{}/api/users/", base),
        friend_requests: format!("{}/api/friend-requests/", base),
    })
}

// Nesting "/" under "/api" would only match "/api", so both forms are routed
// with their full paths.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/api", get(api_root))
        .route("/api/", get(api_root))
        .with_state(ctx)
}
