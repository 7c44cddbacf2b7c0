use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use social_api::application::ports::rate_limiter::ThrottleScope;
use social_api::bootstrap::app_context::{AppContext, AppServices};
use social_api::bootstrap::config::Config;
use social_api::infrastructure::db::repositories::friend_request_repository_sqlx::SqlxFriendRequestRepository;
use social_api::infrastructure::db::repositories::token_repository_sqlx::SqlxTokenRepository;
use social_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use social_api::infrastructure::throttling::InMemoryRateLimiter;
use social_api::presentation::http;

#[derive(OpenApi)]
#[openapi(
        paths(
            social_api::presentation::http::root::api_root,
            social_api::presentation::http::auth::signup,
            social_api::presentation::http::auth::login,
            social_api::presentation::http::users::list_users,
            social_api::presentation::http::users::search_users,
            social_api::presentation::http::users::get_user,
            social_api::presentation::http::friend_requests::create,
            social_api::presentation::http::friend_requests::list,
            social_api::presentation::http::friend_requests::retrieve,
            social_api::presentation::http::friend_requests::replace_status,
            social_api::presentation::http::friend_requests::patch_status,
            social_api::presentation::http::friend_requests::destroy,
            social_api::presentation::http::friend_requests::pending,
            social_api::presentation::http::friend_requests::accepted,
            social_api::presentation::http::health::health,
        ),
        components(schemas(
            social_api::presentation::http::root::ApiRootResponse,
            social_api::presentation::http::auth::SignupBody,
            social_api::presentation::http::auth::LoginBody,
            social_api::presentation::http::auth::TokenResponse,
            social_api::presentation::http::users::UserResponse,
            social_api::presentation::http::users::UserPage,
            social_api::presentation::http::friend_requests::FriendRequestResponse,
            social_api::presentation::http::friend_requests::FriendRequestPage,
            social_api::presentation::http::friend_requests::CreateFriendRequestBody,
            social_api::presentation::http::friend_requests::StatusBody,
            social_api::presentation::http::health::HealthResp,
        )),
        modifiers(&TokenAuthAddon),
        tags(
            (name = "Root", description = "API entry points"),
            (name = "Auth", description = "Signup and login"),
            (name = "Users", description = "User directory and search"),
            (name = "Friend requests", description = "Sending and answering friend requests"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

struct TokenAuthAddon;

impl Modify for TokenAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "social_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        page_size = cfg.page_size,
        friend_request_rate = %cfg.friend_request_rate,
        is_production = cfg.is_production,
        "Starting social API"
    );

    // Database
    let pool =
        social_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    social_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let token_repo = Arc::new(SqlxTokenRepository::new(pool.clone()));
    let friend_request_repo = Arc::new(SqlxFriendRequestRepository::new(pool.clone()));
    let rate_limiter = Arc::new(
        InMemoryRateLimiter::new().with_rate(ThrottleScope::FriendRequests, cfg.friend_request_rate),
    );

    let services = AppServices::new(user_repo, token_repo, friend_request_repo, rate_limiter);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(http::router(ctx))
        .nest("/api", http::health::routes(pool.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(http::cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
