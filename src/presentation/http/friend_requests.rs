use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::rate_limiter::{RateLimitDecision, ThrottleScope};
use crate::application::use_cases::friend_requests::delete_request::DeleteFriendRequest;
use crate::application::use_cases::friend_requests::get_request::GetFriendRequest;
use crate::application::use_cases::friend_requests::list_friends::ListFriends;
use crate::application::use_cases::friend_requests::list_pending::ListPendingRequests;
use crate::application::use_cases::friend_requests::list_requests::{
    ListFriendRequests, ListFriendRequestsError,
};
use crate::application::use_cases::friend_requests::send_request::{
    SendFriendRequest, SendFriendRequestError,
};
use crate::application::use_cases::friend_requests::update_status::{
    UpdateFriendRequestError, UpdateFriendRequestStatus,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::friend_requests::friend_request::FriendRequest;
use crate::infrastructure::throttling::retry_after_secs;
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::links;
use crate::presentation::http::users::{PageQuery, UserResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct FriendRequestResponse {
    pub id: i64,
    pub from_user: UserResponse,
    pub to_user: UserResponse,
    /// One of `pending`, `accepted`, `rejected`.
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FriendRequest> for FriendRequestResponse {
    fn from(r: FriendRequest) -> Self {
        FriendRequestResponse {
            id: r.id,
            from_user: r.from_user.into(),
            to_user: r.to_user.into(),
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FriendRequestPage {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<FriendRequestResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateFriendRequestBody {
    /// Recipient user id.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = i64)]
    pub to_user: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StatusBody {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub status: Option<serde_json::Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/friend-requests/", get(list).post(create))
        .route("/friend-requests/pending/", get(pending))
        .route("/friend-requests/accepted/", get(accepted))
        .route(
            "/friend-requests/:id/",
            get(retrieve)
                .put(replace_status)
                .patch(patch_status)
                .delete(destroy),
        )
        .with_state(ctx)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn render(items: Vec<FriendRequest>) -> Json<Vec<FriendRequestResponse>> {
    Json(items.into_iter().map(Into::into).collect())
}

#[utoipa::path(post, path = "/api/friend-requests/", tag = "Friend requests",
    request_body = CreateFriendRequestBody, security(("token" = [])),
    responses(
        (status = 201, body = FriendRequestResponse),
        (status = 400, description = "Field errors"),
        (status = 429, description = "Throttled")
    ))]
pub async fn create(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    body: Result<JsonBody<CreateFriendRequestBody>, ApiError>,
) -> Result<(StatusCode, Json<FriendRequestResponse>), ApiError> {
    if let RateLimitDecision::Limited { retry_after } = ctx
        .rate_limiter()
        .check_user(user.id, ThrottleScope::FriendRequests)
    {
        tracing::warn!(user_id = user.id, "friend_request_throttled");
        return Err(ApiError::Throttled {
            retry_after_secs: retry_after_secs(retry_after),
        });
    }
    let JsonBody(body) = body?;
    let users = ctx.user_repo();
    let requests = ctx.friend_request_repo();
    let uc = SendFriendRequest {
        users: users.as_ref(),
        requests: requests.as_ref(),
    };
    let created = uc
        .execute(&user, body.to_user.as_ref())
        .await
        .map_err(|e| match e {
            SendFriendRequestError::Invalid(errors) => ApiError::Validation(errors),
            SendFriendRequestError::Other(err) => ApiError::Internal(err),
        })?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/friend-requests/", tag = "Friend requests",
    params(PageQuery), security(("token" = [])),
    responses((status = 200, body = FriendRequestPage), (status = 404, description = "Invalid page")))]
pub async fn list(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(q): Query<PageQuery>,
) -> Result<Json<FriendRequestPage>, ApiError> {
    let request =
        links::page_request(&ctx.cfg, q.page.as_deref()).map_err(|_| ApiError::InvalidPage)?;
    let requests = ctx.friend_request_repo();
    let uc = ListFriendRequests {
        requests: requests.as_ref(),
    };
    let page = uc.execute(user.id, request).await.map_err(|e| match e {
        ListFriendRequestsError::InvalidPage(_) => ApiError::InvalidPage,
        ListFriendRequestsError::Other(err) => ApiError::Internal(err),
    })?;
    let meta = links::page_meta(&ctx.cfg, &headers, &uri, &page);
    Ok(Json(FriendRequestPage {
        count: meta.count,
        next: meta.next,
        previous: meta.previous,
        results: page.items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/friend-requests/{id}/", tag = "Friend requests",
    params(("id" = i64, Path, description = "Friend request id")),
    security(("token" = [])),
    responses((status = 200, body = FriendRequestResponse), (status = 404, description = "Not found")))]
pub async fn retrieve(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FriendRequestResponse>, ApiError> {
    let id = parse_id(&id)?;
    let requests = ctx.friend_request_repo();
    let uc = GetFriendRequest {
        requests: requests.as_ref(),
    };
    let found = uc.execute(user.id, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(found.into()))
}

async fn update_status(
    ctx: AppContext,
    actor_id: i64,
    id: &str,
    body: Result<JsonBody<StatusBody>, ApiError>,
    partial: bool,
) -> Result<Json<FriendRequestResponse>, ApiError> {
    let id = parse_id(id)?;
    let JsonBody(body) = body?;
    let requests = ctx.friend_request_repo();
    let uc = UpdateFriendRequestStatus {
        requests: requests.as_ref(),
    };
    let updated = uc
        .execute(actor_id, id, body.status.as_ref(), partial)
        .await
        .map_err(|e| match e {
            UpdateFriendRequestError::NotFound => ApiError::NotFound,
            UpdateFriendRequestError::Invalid(errors) => ApiError::Validation(errors),
            UpdateFriendRequestError::Other(err) => ApiError::Internal(err),
        })?;
    Ok(Json(updated.into()))
}

#[utoipa::path(put, path = "/api/friend-requests/{id}/", tag = "Friend requests",
    params(("id" = i64, Path, description = "Friend request id")),
    request_body = StatusBody, security(("token" = [])),
    responses(
        (status = 200, body = FriendRequestResponse),
        (status = 400, description = "Invalid status or not the recipient"),
        (status = 404, description = "Not found")
    ))]
pub async fn replace_status(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: Result<JsonBody<StatusBody>, ApiError>,
) -> Result<Json<FriendRequestResponse>, ApiError> {
    update_status(ctx, user.id, &id, body, false).await
}

#[utoipa::path(patch, path = "/api/friend-requests/{id}/", tag = "Friend requests",
    params(("id" = i64, Path, description = "Friend request id")),
    request_body = StatusBody, security(("token" = [])),
    responses(
        (status = 200, body = FriendRequestResponse),
        (status = 400, description = "Invalid status or not the recipient"),
        (status = 404, description = "Not found")
    ))]
pub async fn patch_status(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: Result<JsonBody<StatusBody>, ApiError>,
) -> Result<Json<FriendRequestResponse>, ApiError> {
    update_status(ctx, user.id, &id, body, true).await
}

#[utoipa::path(delete, path = "/api/friend-requests/{id}/", tag = "Friend requests",
    params(("id" = i64, Path, description = "Friend request id")),
    security(("token" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn destroy(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let requests = ctx.friend_request_repo();
    let uc = DeleteFriendRequest {
        requests: requests.as_ref(),
    };
    if uc.execute(user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[utoipa::path(get, path = "/api/friend-requests/pending/", tag = "Friend requests",
    security(("token" = [])),
    responses((status = 200, body = [FriendRequestResponse])))]
pub async fn pending(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<FriendRequestResponse>>, ApiError> {
    let requests = ctx.friend_request_repo();
    let uc = ListPendingRequests {
        requests: requests.as_ref(),
    };
    Ok(render(uc.execute(user.id).await?))
}

#[utoipa::path(get, path = "/api/friend-requests/accepted/", tag = "Friend requests",
    security(("token" = [])),
    responses((status = 200, body = [UserResponse])))]
pub async fn accepted(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let requests = ctx.friend_request_repo();
    let uc = ListFriends {
        requests: requests.as_ref(),
    };
    let friends = uc.execute(user.id).await?;
    Ok(Json(friends.into_iter().map(Into::into).collect()))
}
