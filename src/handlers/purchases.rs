use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::pagination::ListParams,
    config::AppState,
    middleware::access::{
        PurchasesCreate, PurchasesDelete, PurchasesEdit, PurchasesView, RequireAccess,
    },
    middleware::auth::AuthenticatedUser,
    models::purchases::{Purchase, PurchasePayload},
};

// GET /api/purchases
#[utoipa::path(
    get,
    path = "/api/purchases",
    tag = "Compras",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de compras")),
    security(("api_jwt" = []))
)]
pub async fn list_purchases(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PurchasesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchases_repo.list_purchases(&params).await?))
}

// POST /api/purchases
#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "Compras",
    request_body = PurchasePayload,
    responses((status = 201, description = "Compra criada", body = Purchase)),
    security(("api_jwt" = []))
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PurchasesCreate>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PurchasePayload>,
) -> Result<(StatusCode, Json<Purchase>), AppError> {
    payload.validate()?;
    let purchase = app_state
        .purchases_repo
        .create_purchase(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

// PUT /api/purchases/{id}
#[utoipa::path(
    put,
    path = "/api/purchases/{id}",
    tag = "Compras",
    request_body = PurchasePayload,
    responses((status = 200, description = "Compra atualizada", body = Purchase)),
    security(("api_jwt" = []))
)]
pub async fn update_purchase(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PurchasesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<PurchasePayload>,
) -> Result<Json<Purchase>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.purchases_repo.update_purchase(id, &payload).await?))
}

// DELETE /api/purchases/{id}
#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    tag = "Compras",
    responses((status = 204, description = "Compra removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_purchase(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PurchasesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.purchases_repo.delete_purchase(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
