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
        CashRegistersCreate, CashRegistersDelete, CashRegistersEdit, CashRegistersView,
        ExpenseTypesCreate, ExpenseTypesDelete, ExpenseTypesEdit, ExpenseTypesView, RequireAccess,
    },
    middleware::auth::AuthenticatedUser,
    models::cash::{
        CashRegister, CashRegisterLog, CashRegisterPayload, CloseLogPayload, ExpenseType,
        ExpenseTypePayload, OpenLogPayload,
    },
};

// =============================================================================
//  CAIXAS
// =============================================================================

// GET /api/cash-registers
#[utoipa::path(
    get,
    path = "/api/cash-registers",
    tag = "Caixa",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de caixas")),
    security(("api_jwt" = []))
)]
pub async fn list_registers(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cash_repo.list_registers(&params).await?))
}

// POST /api/cash-registers
#[utoipa::path(
    post,
    path = "/api/cash-registers",
    tag = "Caixa",
    request_body = CashRegisterPayload,
    responses((status = 201, description = "Caixa criado", body = CashRegister)),
    security(("api_jwt" = []))
)]
pub async fn create_register(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersCreate>,
    Json(payload): Json<CashRegisterPayload>,
) -> Result<(StatusCode, Json<CashRegister>), AppError> {
    payload.validate()?;
    let register = app_state.cash_repo.create_register(&payload).await?;
    Ok((StatusCode::CREATED, Json(register)))
}

// PUT /api/cash-registers/{id}
#[utoipa::path(
    put,
    path = "/api/cash-registers/{id}",
    tag = "Caixa",
    request_body = CashRegisterPayload,
    responses((status = 200, description = "Caixa atualizado", body = CashRegister)),
    security(("api_jwt" = []))
)]
pub async fn update_register(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<CashRegisterPayload>,
) -> Result<Json<CashRegister>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.cash_repo.update_register(id, &payload).await?))
}

// DELETE /api/cash-registers/{id}
#[utoipa::path(
    delete,
    path = "/api/cash-registers/{id}",
    tag = "Caixa",
    responses((status = 204, description = "Caixa removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_register(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.cash_repo.delete_register(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ABERTURA / FECHAMENTO
// =============================================================================

// GET /api/cash-registers/{id}/logs
#[utoipa::path(
    get,
    path = "/api/cash-registers/{id}/logs",
    tag = "Caixa",
    responses((status = 200, description = "Histórico de aberturas e fechamentos", body = Vec<CashRegisterLog>)),
    security(("api_jwt" = []))
)]
pub async fn list_register_logs(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersView>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CashRegisterLog>>, AppError> {
    app_state.cash_repo.find_register(id).await?;
    Ok(Json(app_state.cash_repo.list_logs(id).await?))
}

// POST /api/cash-registers/{id}/open
#[utoipa::path(
    post,
    path = "/api/cash-registers/{id}/open",
    tag = "Caixa",
    request_body = OpenLogPayload,
    responses(
        (status = 201, description = "Caixa aberto", body = CashRegisterLog),
        (status = 409, description = "Caixa já aberto")
    ),
    security(("api_jwt" = []))
)]
pub async fn open_register(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersEdit>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<OpenLogPayload>,
) -> Result<(StatusCode, Json<CashRegisterLog>), AppError> {
    let log = app_state.cash_service.open_log(id, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

// POST /api/cash-registers/{id}/close
#[utoipa::path(
    post,
    path = "/api/cash-registers/{id}/close",
    tag = "Caixa",
    request_body = CloseLogPayload,
    responses(
        (status = 200, description = "Caixa fechado", body = CashRegisterLog),
        (status = 409, description = "Caixa não está aberto")
    ),
    security(("api_jwt" = []))
)]
pub async fn close_register(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CashRegistersEdit>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CloseLogPayload>,
) -> Result<Json<CashRegisterLog>, AppError> {
    Ok(Json(app_state.cash_service.close_log(id, user.id, &payload).await?))
}

// =============================================================================
//  TIPOS DE DESPESA
// =============================================================================

// GET /api/expense-types
#[utoipa::path(
    get,
    path = "/api/expense-types",
    tag = "Caixa",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de tipos de despesa")),
    security(("api_jwt" = []))
)]
pub async fn list_expense_types(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ExpenseTypesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cash_repo.list_expense_types(&params).await?))
}

// POST /api/expense-types
#[utoipa::path(
    post,
    path = "/api/expense-types",
    tag = "Caixa",
    request_body = ExpenseTypePayload,
    responses((status = 201, description = "Tipo de despesa criado", body = ExpenseType)),
    security(("api_jwt" = []))
)]
pub async fn create_expense_type(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ExpenseTypesCreate>,
    Json(payload): Json<ExpenseTypePayload>,
) -> Result<(StatusCode, Json<ExpenseType>), AppError> {
    payload.validate()?;
    let expense_type = app_state.cash_repo.create_expense_type(&payload).await?;
    Ok((StatusCode::CREATED, Json(expense_type)))
}

// PUT /api/expense-types/{id}
#[utoipa::path(
    put,
    path = "/api/expense-types/{id}",
    tag = "Caixa",
    request_body = ExpenseTypePayload,
    responses((status = 200, description = "Tipo de despesa atualizado", body = ExpenseType)),
    security(("api_jwt" = []))
)]
pub async fn update_expense_type(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ExpenseTypesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseTypePayload>,
) -> Result<Json<ExpenseType>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.cash_repo.update_expense_type(id, &payload).await?))
}

// DELETE /api/expense-types/{id}
#[utoipa::path(
    delete,
    path = "/api/expense-types/{id}",
    tag = "Caixa",
    responses((status = 204, description = "Tipo de despesa removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_expense_type(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ExpenseTypesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.cash_repo.delete_expense_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
