//! User handlers.
//!
//! Mutations (`POST /`, `PUT /:id`, `DELETE /:id`) take an [`AgeGuarded`]
//! body, so the age check always runs before the handler body and a
//! rejection short-circuits the request.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::de::IgnoredAny;

use crate::api::extractors::AgeGuarded;
use crate::api::state::AppState;
use crate::domain::{DeleteResult, FullName, User, UserPayload};
use crate::errors::{AppError, AppResult};
use crate::types::{normalize_params, PaginationParams};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/fullnames", get(list_full_names))
        .route("/:id", put(update_user).delete(delete_user))
}

/// Read the pagination window out of the raw query pairs.
fn pagination(query: &[(String, String)]) -> PaginationParams {
    tracing::debug!(normalized = ?normalize_params(query), "Normalized query parameters");
    PaginationParams::from_query(query)
}

/// Path ids are parsed after the guard so an under-age request is always
/// reported as such, whatever the id looks like.
fn parse_user_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("invalid user id: {}", raw)))
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(
        ("from" = Option<f64>, Query, description = "Zero-based offset; non-numeric values count as 0"),
        ("to" = Option<f64>, Query, description = "Exclusive end index; open-ended when not above `from`")
    ),
    responses(
        (status = 200, description = "Users inside the window", body = Vec<User>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users(&pagination(&query)).await?;
    Ok(Json(users))
}

/// List full names of users
#[utoipa::path(
    get,
    path = "/users/fullnames",
    tag = "Users",
    params(
        ("from" = Option<f64>, Query, description = "Zero-based offset; non-numeric values count as 0"),
        ("to" = Option<f64>, Query, description = "Exclusive end index; open-ended when not above `from`")
    ),
    responses(
        (status = 200, description = "Full names inside the window", body = Vec<FullName>)
    )
)]
pub async fn list_full_names(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<FullName>>> {
    let names = state
        .user_service
        .list_full_names(&pagination(&query))
        .await?;
    Ok(Json(names))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Age missing or below 18, or malformed body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AgeGuarded(payload): AgeGuarded<UserPayload>,
) -> AppResult<Json<User>> {
    let user = state.user_service.create(payload).await?;
    Ok(Json(user))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Age missing or below 18, malformed body or id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AgeGuarded(payload): AgeGuarded<UserPayload>,
) -> AppResult<Json<User>> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.update(payload, id).await?;
    Ok(Json(user))
}

/// Delete a user
///
/// The body must still carry an `age` of at least 18.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteResult),
        (status = 400, description = "Age missing or below 18, or malformed id")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _guard: AgeGuarded<IgnoredAny>,
) -> AppResult<Json<DeleteResult>> {
    let id = parse_user_id(&id)?;
    let result = state.user_service.delete(id).await?;
    Ok(Json(result))
}
