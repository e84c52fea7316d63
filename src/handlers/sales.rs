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
        InvoiceRangesCreate, InvoiceRangesDelete, InvoiceRangesEdit, InvoiceRangesView,
        RequireAccess, SalesCreate, SalesDelete, SalesEdit, SalesView,
    },
    middleware::auth::AuthenticatedUser,
    models::sales::{
        CreateSalePayload, CreditPaymentPayload, InvoiceRange, InvoiceRangePayload, Sale,
        SaleCreditDetail, SaleDetail, UpdateSalePayload,
    },
};

// =============================================================================
//  RANGOS DE FACTURA
// =============================================================================

// GET /api/invoice-ranges
#[utoipa::path(
    get,
    path = "/api/invoice-ranges",
    tag = "Vendas",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de rangos")),
    security(("api_jwt" = []))
)]
pub async fn list_invoice_ranges(
    State(app_state): State<AppState>,
    _perm: RequireAccess<InvoiceRangesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.sales_repo.list_invoice_ranges(&params).await?))
}

// POST /api/invoice-ranges
#[utoipa::path(
    post,
    path = "/api/invoice-ranges",
    tag = "Vendas",
    request_body = InvoiceRangePayload,
    responses(
        (status = 201, description = "Rango criado", body = InvoiceRange),
        (status = 409, description = "Sobreposição com rango existente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice_range(
    State(app_state): State<AppState>,
    _perm: RequireAccess<InvoiceRangesCreate>,
    Json(payload): Json<InvoiceRangePayload>,
) -> Result<(StatusCode, Json<InvoiceRange>), AppError> {
    payload.validate()?;
    let range = app_state.sales_service.create_invoice_range(&payload).await?;
    Ok((StatusCode::CREATED, Json(range)))
}

// PUT /api/invoice-ranges/{id}
#[utoipa::path(
    put,
    path = "/api/invoice-ranges/{id}",
    tag = "Vendas",
    request_body = InvoiceRangePayload,
    responses(
        (status = 200, description = "Rango atualizado", body = InvoiceRange),
        (status = 409, description = "Sobreposição com rango existente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice_range(
    State(app_state): State<AppState>,
    _perm: RequireAccess<InvoiceRangesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<InvoiceRangePayload>,
) -> Result<Json<InvoiceRange>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.sales_service.update_invoice_range(id, &payload).await?))
}

// DELETE /api/invoice-ranges/{id}
#[utoipa::path(
    delete,
    path = "/api/invoice-ranges/{id}",
    tag = "Vendas",
    responses((status = 204, description = "Rango removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice_range(
    State(app_state): State<AppState>,
    _perm: RequireAccess<InvoiceRangesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.sales_repo.delete_invoice_range(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  VENDAS
// =============================================================================

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de vendas")),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.sales_repo.list_sales(&params).await?))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda criada", body = SaleDetail),
        (status = 422, description = "Estoque insuficiente ou rango esgotado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesCreate>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSalePayload>,
) -> Result<(StatusCode, Json<SaleDetail>), AppError> {
    payload.validate()?;
    let detail = app_state.sales_service.create_sale(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Vendas",
    responses(
        (status = 200, description = "Cabeçalho e itens da venda", body = SaleDetail),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesView>,
    Path(id): Path<i32>,
) -> Result<Json<SaleDetail>, AppError> {
    Ok(Json(app_state.sales_service.sale_detail(id).await?))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Vendas",
    request_body = UpdateSalePayload,
    responses((status = 200, description = "Status atualizado", body = Sale)),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<Json<Sale>, AppError> {
    Ok(Json(app_state.sales_service.update_sale_status(id, payload.status).await?))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Vendas",
    responses((status = 204, description = "Venda removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.sales_repo.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CRÉDITO
// =============================================================================

// GET /api/sales/{id}/credit
#[utoipa::path(
    get,
    path = "/api/sales/{id}/credit",
    tag = "Vendas",
    responses(
        (status = 200, description = "Crédito com pagamentos e saldo", body = SaleCreditDetail),
        (status = 404, description = "Venda sem crédito")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale_credit(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesView>,
    Path(id): Path<i32>,
) -> Result<Json<SaleCreditDetail>, AppError> {
    Ok(Json(app_state.sales_service.credit_detail(id).await?))
}

// POST /api/sales/{id}/payments
#[utoipa::path(
    post,
    path = "/api/sales/{id}/payments",
    tag = "Vendas",
    request_body = CreditPaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = SaleCreditDetail),
        (status = 422, description = "Pagamento excede o saldo devedor")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_credit_payment(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<CreditPaymentPayload>,
) -> Result<(StatusCode, Json<SaleCreditDetail>), AppError> {
    payload.validate()?;
    let detail = app_state.sales_service.register_payment(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}
