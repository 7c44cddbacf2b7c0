use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, Uri},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::dto::pagination::Page;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::{ListUsers, ListUsersError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{User, UserFilter};
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::links;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPage {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<UserResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, or `last`.
    pub page: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchUsersQuery {
    /// Email address (exact) or part of a name.
    pub q: Option<String>,
    pub page: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/", get(list_users))
        .route("/users/search/", get(search_users))
        .route("/users/:id/", get(get_user))
        .with_state(ctx)
}

async fn paginate(
    ctx: &AppContext,
    headers: &HeaderMap,
    uri: &Uri,
    filter: UserFilter,
    page: Option<&str>,
) -> Result<UserPage, ApiError> {
    let request = links::page_request(&ctx.cfg, page).map_err(|_| ApiError::InvalidPage)?;
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let page: Page<User> = uc.execute(&filter, request).await.map_err(|e| match e {
        ListUsersError::InvalidPage(_) => ApiError::InvalidPage,
        ListUsersError::Other(err) => ApiError::Internal(err),
    })?;
    let meta = links::page_meta(&ctx.cfg, headers, uri, &page);
    Ok(UserPage {
        count: meta.count,
        next: meta.next,
        previous: meta.previous,
        results: page.items.into_iter().map(UserResponse::from).collect(),
    })
}

#[utoipa::path(get, path = "/api/users/", tag = "Users", params(PageQuery),
    security(("token" = [])),
    responses((status = 200, body = UserPage), (status = 404, description = "Invalid page")))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    AuthUser(_user): AuthUser,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(q): Query<PageQuery>,
) -> Result<Json<UserPage>, ApiError> {
    let page = paginate(&ctx, &headers, &uri, UserFilter::All, q.page.as_deref()).await?;
    Ok(Json(page))
}

#[utoipa::path(get, path = "/api/users/search/", tag = "Users", params(SearchUsersQuery),
    security(("token" = [])),
    responses((status = 200, body = UserPage), (status = 404, description = "Invalid page")))]
pub async fn search_users(
    State(ctx): State<AppContext>,
    AuthUser(_user): AuthUser,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(q): Query<SearchUsersQuery>,
) -> Result<Json<UserPage>, ApiError> {
    let filter = UserFilter::from_search(q.q.as_deref().unwrap_or_default());
    let page = paginate(&ctx, &headers, &uri, filter, q.page.as_deref()).await?;
    Ok(Json(page))
}

#[utoipa::path(get, path = "/api/users/{id}/", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    security(("token" = [])),
    responses((status = 200, body = UserResponse), (status = 404, description = "Not found")))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::NotFound)?;
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}
