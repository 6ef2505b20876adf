//! HTTP handlers for notification endpoints
//!
//! Scoped by the authenticated user id (`x-user-id`), not the owner id.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use crate::core::error::ApiResult;
use crate::notifications::{Notification, NotificationListQuery, NotificationPage};
use crate::server::extract::UserId;
use crate::server::AppState;

/// Notification route table:
/// - `GET /notifications` — paginated list
/// - `GET /notifications/unread-count` — bare unread count
/// - `PATCH /notifications/read-all` — mark every unread as read
/// - `PATCH /notifications/{id}/read` — mark one as read (null when absent)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", patch(mark_all_as_read))
        .route("/notifications/{id}/read", patch(mark_as_read))
}

async fn list_notifications(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(query): Query<NotificationListQuery>,
) -> ApiResult<Json<NotificationPage>> {
    let page = state.notifications.find_all(user_id, &query).await?;
    Ok(Json(page))
}

async fn unread_count(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> ApiResult<Json<usize>> {
    let count = state.notifications.count_unread(user_id).await?;
    Ok(Json(count))
}

async fn mark_as_read(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<Notification>>> {
    let updated = state.notifications.mark_as_read(id, user_id).await?;
    Ok(Json(updated))
}

async fn mark_all_as_read(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> ApiResult<StatusCode> {
    state.notifications.mark_all_as_read(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
