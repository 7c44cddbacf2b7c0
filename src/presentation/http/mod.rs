pub mod auth;
pub mod error;
pub mod friend_requests;
pub mod health;
pub mod links;
pub mod root;
pub mod users;

use axum::Router;
use http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

/// Every resource router, mounted under `/api`. Health and docs need the pool
/// and the OpenAPI document, so the binary attaches those itself.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(root::routes(ctx.clone()))
        .nest("/api", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", friend_requests::routes(ctx))
}

pub fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Production refuses to start without FRONTEND_URL; an unparsable one
        // matches nothing.
        Some(Err(_)) | None if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}
