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
        ClientsCreate, ClientsDelete, ClientsEdit, ClientsView, RequireAccess, SchoolsCreate,
        SchoolsDelete, SchoolsEdit, SchoolsView, SuppliersCreate, SuppliersDelete, SuppliersEdit,
        SuppliersView,
    },
    models::parties::{
        Client, ClientPayload, School, SchoolPayload, Supplier, SupplierPayload,
    },
};

// =============================================================================
//  CLIENTES
// =============================================================================

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Pessoas",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de clientes")),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ClientsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.parties_repo.list_clients(&params).await?))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Pessoas",
    request_body = ClientPayload,
    responses((status = 201, description = "Cliente criado", body = Client)),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ClientsCreate>,
    Json(payload): Json<ClientPayload>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    payload.validate()?;
    let client = app_state.parties_repo.create_client(&payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Pessoas",
    request_body = ClientPayload,
    responses((status = 200, description = "Cliente atualizado", body = Client)),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ClientsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientPayload>,
) -> Result<Json<Client>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.parties_repo.update_client(id, &payload).await?))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Pessoas",
    responses((status = 204, description = "Cliente removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ClientsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.parties_repo.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  FORNECEDORES
// =============================================================================

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Pessoas",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de fornecedores")),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SuppliersView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.parties_repo.list_suppliers(&params).await?))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Pessoas",
    request_body = SupplierPayload,
    responses((status = 201, description = "Fornecedor criado", body = Supplier)),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SuppliersCreate>,
    Json(payload): Json<SupplierPayload>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    payload.validate()?;
    let supplier = app_state.parties_repo.create_supplier(&payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Pessoas",
    request_body = SupplierPayload,
    responses((status = 200, description = "Fornecedor atualizado", body = Supplier)),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SuppliersEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.parties_repo.update_supplier(id, &payload).await?))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Pessoas",
    responses((status = 204, description = "Fornecedor removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SuppliersDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.parties_repo.delete_supplier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ESCOLAS
// =============================================================================

// GET /api/schools
#[utoipa::path(
    get,
    path = "/api/schools",
    tag = "Pessoas",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de escolas")),
    security(("api_jwt" = []))
)]
pub async fn list_schools(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SchoolsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.parties_repo.list_schools(&params).await?))
}

// POST /api/schools
#[utoipa::path(
    post,
    path = "/api/schools",
    tag = "Pessoas",
    request_body = SchoolPayload,
    responses((status = 201, description = "Escola criada", body = School)),
    security(("api_jwt" = []))
)]
pub async fn create_school(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SchoolsCreate>,
    Json(payload): Json<SchoolPayload>,
) -> Result<(StatusCode, Json<School>), AppError> {
    payload.validate()?;
    let school = app_state.parties_repo.create_school(&payload).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

// PUT /api/schools/{id}
#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    tag = "Pessoas",
    request_body = SchoolPayload,
    responses((status = 200, description = "Escola atualizada", body = School)),
    security(("api_jwt" = []))
)]
pub async fn update_school(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SchoolsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<SchoolPayload>,
) -> Result<Json<School>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.parties_repo.update_school(id, &payload).await?))
}

// DELETE /api/schools/{id}
#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    tag = "Pessoas",
    responses((status = 204, description = "Escola removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_school(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SchoolsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.parties_repo.delete_school(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
