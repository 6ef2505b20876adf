//! HTTP handlers for tenant endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::core::error::ApiResult;
use crate::core::query::Paginated;
use crate::server::extract::{OwnerId, ValidatedJson};
use crate::server::AppState;
use crate::tenants::{CreateTenant, Tenant, TenantListQuery, UpdateTenant};

/// Tenant route table:
/// - `POST /tenants` — create (201, 409 on duplicate, 403 on RENTING)
/// - `GET /tenants` — paginated list with search/status/room filters
/// - `GET /tenants/{id}` — fetch one
/// - `PUT`/`PATCH /tenants/{id}` — partial update, same conflict rules
/// - `DELETE /tenants/{id}` — soft delete
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants", axum::routing::post(create_tenant).get(list_tenants))
        .route(
            "/tenants/{id}",
            get(get_tenant)
                .put(update_tenant)
                .patch(update_tenant)
                .delete(delete_tenant),
        )
}

async fn create_tenant(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    ValidatedJson(body): ValidatedJson<CreateTenant>,
) -> ApiResult<(StatusCode, Json<Tenant>)> {
    let tenant = state.tenants.create(owner_id, body).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

async fn list_tenants(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<Json<Paginated<Tenant>>> {
    let page = state.tenants.find_all(owner_id, &query).await?;
    Ok(Json(page))
}

async fn get_tenant(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Tenant>> {
    let tenant = state.tenants.find_one(id, owner_id).await?;
    Ok(Json(tenant))
}

async fn update_tenant(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateTenant>,
) -> ApiResult<Json<Tenant>> {
    let tenant = state.tenants.update(id, owner_id, body).await?;
    Ok(Json(tenant))
}

async fn delete_tenant(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.tenants.remove(id, owner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
