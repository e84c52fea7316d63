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
        CombosCreate, CombosDelete, CombosEdit, CombosView, CurrenciesCreate, CurrenciesDelete,
        CurrenciesEdit, CurrenciesView, LocalsCreate, LocalsDelete, LocalsEdit, LocalsView,
        ProductsCreate, ProductsDelete, ProductsEdit, ProductsView, RequireAccess,
        TransportsCreate, TransportsDelete, TransportsEdit, TransportsView, WarehousesCreate,
        WarehousesDelete, WarehousesEdit, WarehousesView,
    },
    models::catalog::{
        Combo, ComboPayload, Currency, CurrencyPayload, Local, LocalPayload, Product,
        ProductPayload, Transport, TransportPayload, Warehouse, WarehousePayload,
    },
};

// =============================================================================
//  LOCAIS
// =============================================================================

// GET /api/locals
#[utoipa::path(
    get,
    path = "/api/locals",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de locais")),
    security(("api_jwt" = []))
)]
pub async fn list_locals(
    State(app_state): State<AppState>,
    _perm: RequireAccess<LocalsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_locals(&params).await?))
}

// POST /api/locals
#[utoipa::path(
    post,
    path = "/api/locals",
    tag = "Catálogo",
    request_body = LocalPayload,
    responses((status = 201, description = "Local criado", body = Local)),
    security(("api_jwt" = []))
)]
pub async fn create_local(
    State(app_state): State<AppState>,
    _perm: RequireAccess<LocalsCreate>,
    Json(payload): Json<LocalPayload>,
) -> Result<(StatusCode, Json<Local>), AppError> {
    payload.validate()?;
    let local = app_state.catalog_repo.create_local(&payload).await?;
    Ok((StatusCode::CREATED, Json(local)))
}

// PUT /api/locals/{id}
#[utoipa::path(
    put,
    path = "/api/locals/{id}",
    tag = "Catálogo",
    request_body = LocalPayload,
    responses((status = 200, description = "Local atualizado", body = Local)),
    security(("api_jwt" = []))
)]
pub async fn update_local(
    State(app_state): State<AppState>,
    _perm: RequireAccess<LocalsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<LocalPayload>,
) -> Result<Json<Local>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_local(id, &payload).await?))
}

// DELETE /api/locals/{id}
#[utoipa::path(
    delete,
    path = "/api/locals/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Local removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_local(
    State(app_state): State<AppState>,
    _perm: RequireAccess<LocalsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_local(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ARMAZÉNS
// =============================================================================

// GET /api/warehouses
#[utoipa::path(
    get,
    path = "/api/warehouses",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de armazéns")),
    security(("api_jwt" = []))
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    _perm: RequireAccess<WarehousesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_warehouses(&params).await?))
}

// POST /api/warehouses
#[utoipa::path(
    post,
    path = "/api/warehouses",
    tag = "Catálogo",
    request_body = WarehousePayload,
    responses((status = 201, description = "Armazém criado", body = Warehouse)),
    security(("api_jwt" = []))
)]
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    _perm: RequireAccess<WarehousesCreate>,
    Json(payload): Json<WarehousePayload>,
) -> Result<(StatusCode, Json<Warehouse>), AppError> {
    payload.validate()?;
    let warehouse = app_state.catalog_repo.create_warehouse(&payload).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

// PUT /api/warehouses/{id}
#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    tag = "Catálogo",
    request_body = WarehousePayload,
    responses((status = 200, description = "Armazém atualizado", body = Warehouse)),
    security(("api_jwt" = []))
)]
pub async fn update_warehouse(
    State(app_state): State<AppState>,
    _perm: RequireAccess<WarehousesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<WarehousePayload>,
) -> Result<Json<Warehouse>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_warehouse(id, &payload).await?))
}

// DELETE /api/warehouses/{id}
#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Armazém removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_warehouse(
    State(app_state): State<AppState>,
    _perm: RequireAccess<WarehousesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_warehouse(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PRODUTOS
// =============================================================================

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de produtos")),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProductsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_products(&params).await?))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catálogo",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 409, description = "Código duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProductsCreate>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    payload.validate()?;
    let product = app_state.catalog_repo.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catálogo",
    request_body = ProductPayload,
    responses((status = 200, description = "Produto atualizado", body = Product)),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProductsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_product(id, &payload).await?))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Produto removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProductsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  COMBOS
// =============================================================================

// GET /api/combos
#[utoipa::path(
    get,
    path = "/api/combos",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de combos")),
    security(("api_jwt" = []))
)]
pub async fn list_combos(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CombosView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_combos(&params).await?))
}

// POST /api/combos
#[utoipa::path(
    post,
    path = "/api/combos",
    tag = "Catálogo",
    request_body = ComboPayload,
    responses((status = 201, description = "Combo criado", body = Combo)),
    security(("api_jwt" = []))
)]
pub async fn create_combo(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CombosCreate>,
    Json(payload): Json<ComboPayload>,
) -> Result<(StatusCode, Json<Combo>), AppError> {
    payload.validate()?;
    let combo = app_state.catalog_repo.create_combo(&payload).await?;
    Ok((StatusCode::CREATED, Json(combo)))
}

// PUT /api/combos/{id}
#[utoipa::path(
    put,
    path = "/api/combos/{id}",
    tag = "Catálogo",
    request_body = ComboPayload,
    responses((status = 200, description = "Combo atualizado", body = Combo)),
    security(("api_jwt" = []))
)]
pub async fn update_combo(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CombosEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<ComboPayload>,
) -> Result<Json<Combo>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_combo(id, &payload).await?))
}

// DELETE /api/combos/{id}
#[utoipa::path(
    delete,
    path = "/api/combos/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Combo removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_combo(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CombosDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_combo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  TRANSPORTES
// =============================================================================

// GET /api/transports
#[utoipa::path(
    get,
    path = "/api/transports",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de transportes")),
    security(("api_jwt" = []))
)]
pub async fn list_transports(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TransportsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_transports(&params).await?))
}

// POST /api/transports
#[utoipa::path(
    post,
    path = "/api/transports",
    tag = "Catálogo",
    request_body = TransportPayload,
    responses((status = 201, description = "Transporte criado", body = Transport)),
    security(("api_jwt" = []))
)]
pub async fn create_transport(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TransportsCreate>,
    Json(payload): Json<TransportPayload>,
) -> Result<(StatusCode, Json<Transport>), AppError> {
    payload.validate()?;
    let transport = app_state.catalog_repo.create_transport(&payload).await?;
    Ok((StatusCode::CREATED, Json(transport)))
}

// PUT /api/transports/{id}
#[utoipa::path(
    put,
    path = "/api/transports/{id}",
    tag = "Catálogo",
    request_body = TransportPayload,
    responses((status = 200, description = "Transporte atualizado", body = Transport)),
    security(("api_jwt" = []))
)]
pub async fn update_transport(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TransportsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<TransportPayload>,
) -> Result<Json<Transport>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_transport(id, &payload).await?))
}

// DELETE /api/transports/{id}
#[utoipa::path(
    delete,
    path = "/api/transports/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Transporte removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_transport(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TransportsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_transport(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  MOEDAS
// =============================================================================

// GET /api/currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "Catálogo",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de moedas")),
    security(("api_jwt" = []))
)]
pub async fn list_currencies(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CurrenciesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.catalog_repo.list_currencies(&params).await?))
}

// POST /api/currencies
#[utoipa::path(
    post,
    path = "/api/currencies",
    tag = "Catálogo",
    request_body = CurrencyPayload,
    responses(
        (status = 201, description = "Moeda criada", body = Currency),
        (status = 409, description = "Código duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_currency(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CurrenciesCreate>,
    Json(payload): Json<CurrencyPayload>,
) -> Result<(StatusCode, Json<Currency>), AppError> {
    payload.validate()?;
    let currency = app_state.catalog_repo.create_currency(&payload).await?;
    Ok((StatusCode::CREATED, Json(currency)))
}

// PUT /api/currencies/{id}
#[utoipa::path(
    put,
    path = "/api/currencies/{id}",
    tag = "Catálogo",
    request_body = CurrencyPayload,
    responses((status = 200, description = "Moeda atualizada", body = Currency)),
    security(("api_jwt" = []))
)]
pub async fn update_currency(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CurrenciesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<CurrencyPayload>,
) -> Result<Json<Currency>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.catalog_repo.update_currency(id, &payload).await?))
}

// DELETE /api/currencies/{id}
#[utoipa::path(
    delete,
    path = "/api/currencies/{id}",
    tag = "Catálogo",
    responses((status = 204, description = "Moeda removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_currency(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CurrenciesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_repo.delete_currency(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
