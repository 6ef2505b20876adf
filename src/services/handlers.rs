//! HTTP handlers for catalog endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::core::error::ApiResult;
use crate::core::query::Paginated;
use crate::server::extract::{OwnerId, ValidatedJson};
use crate::server::AppState;
use crate::services::{CreateService, Service, ServiceListQuery, UpdateService};

/// Catalog route table, same shape as the tenant routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            axum::routing::post(create_service).get(list_services),
        )
        .route(
            "/services/{id}",
            get(get_service)
                .put(update_service)
                .patch(update_service)
                .delete(delete_service),
        )
}

async fn create_service(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    ValidatedJson(body): ValidatedJson<CreateService>,
) -> ApiResult<(StatusCode, Json<Service>)> {
    let service = state.services.create(owner_id, body).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

async fn list_services(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<ServiceListQuery>,
) -> ApiResult<Json<Paginated<Service>>> {
    let page = state.services.find_all(owner_id, &query).await?;
    Ok(Json(page))
}

async fn get_service(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Service>> {
    let service = state.services.find_one(id, owner_id).await?;
    Ok(Json(service))
}

async fn update_service(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateService>,
) -> ApiResult<Json<Service>> {
    let service = state.services.update(id, owner_id, body).await?;
    Ok(Json(service))
}

async fn delete_service(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.services.remove(id, owner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
