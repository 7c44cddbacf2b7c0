use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::auth::AuthenticatedDto;
use crate::application::use_cases::auth::authenticate::{AuthenticateToken, TokenAuthError};
use crate::application::use_cases::auth::login::{Login, LoginRequest};
use crate::application::use_cases::auth::signup::{Signup, SignupError, SignupRequest};
use crate::application::validation::ValidationErrors;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::users::UserResponse;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignupBody {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Send as `Authorization: Token <token>`.
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthenticatedDto> for TokenResponse {
    fn from(dto: AuthenticatedDto) -> Self {
        TokenResponse {
            token: dto.token,
            user: dto.user.into(),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup/", post(signup))
        .route("/login/", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/signup/", tag = "Auth", request_body = SignupBody, security(()), responses(
    (status = 201, body = TokenResponse),
    (status = 400, description = "Field errors")
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    body: Result<JsonBody<SignupBody>, ApiError>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let JsonBody(body) = body?;
    let req = SignupRequest::parse(
        body.email.as_deref(),
        body.name.as_deref(),
        body.password.as_deref(),
    )?;
    let users = ctx.user_repo();
    let tokens = ctx.token_repo();
    let uc = Signup {
        users: users.as_ref(),
        tokens: tokens.as_ref(),
    };
    let out = uc.execute(&req).await.map_err(|e| match e {
        SignupError::Invalid(errors) => ApiError::Validation(errors),
        SignupError::Other(err) => ApiError::Internal(err),
    })?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

#[utoipa::path(post, path = "/api/login/", tag = "Auth", request_body = LoginBody, security(()), responses(
    (status = 200, body = TokenResponse),
    (status = 400, description = "Invalid credentials")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<JsonBody<LoginBody>, ApiError>,
) -> Result<Json<TokenResponse>, ApiError> {
    let JsonBody(body) = body?;
    let req = LoginRequest::parse(body.email.as_deref(), body.password.as_deref())?;
    let users = ctx.user_repo();
    let tokens = ctx.token_repo();
    let uc = Login {
        users: users.as_ref(),
        tokens: tokens.as_ref(),
    };
    let out = uc.execute(&req).await?.ok_or_else(|| {
        tracing::debug!("login_rejected");
        ApiError::Validation(ValidationErrors::non_field("Invalid email or password."))
    })?;
    Ok(Json(out.into()))
}

// --- Token authentication extractor ---

/// The user behind a valid `Authorization: Token <key>` header.
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let key = token_from_headers(&parts.headers)?;
        let tokens = ctx.token_repo();
        let uc = AuthenticateToken {
            tokens: tokens.as_ref(),
        };
        let user = uc.execute(&key).await.map_err(|e| match e {
            TokenAuthError::InvalidToken => ApiError::AuthenticationFailed("Invalid token."),
            TokenAuthError::Inactive => ApiError::AuthenticationFailed("User inactive or deleted."),
            TokenAuthError::Other(err) => ApiError::Internal(err),
        })?;
        Ok(AuthUser(user))
    }
}

/// Pulls the key out of `Authorization: Token <key>`. Any other scheme counts
/// as no credentials at all.
pub fn token_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(raw) = headers.get(header::AUTHORIZATION) else {
        return Err(ApiError::NotAuthenticated);
    };
    let mut parts = raw.as_bytes().split(|b| b.is_ascii_whitespace()).filter(|p| !p.is_empty());
    match parts.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case(b"token") => {}
        _ => return Err(ApiError::NotAuthenticated),
    }
    let Some(key) = parts.next() else {
        return Err(ApiError::AuthenticationFailed(
            "Invalid token header. No credentials provided.",
        ));
    };
    if parts.next().is_some() {
        return Err(ApiError::AuthenticationFailed(
            "Invalid token header. Token string should not contain spaces.",
        ));
    }
    std::str::from_utf8(key).map(str::to_string).map_err(|_| {
        ApiError::AuthenticationFailed(
            "Invalid token header. Token string should not contain invalid characters.",
        )
    })
}
