use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{RequireAccess, SalesExport},
};

// GET /api/sales/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/sales/{id}/pdf",
    tag = "Vendas",
    responses(
        (status = 200, description = "Comprovante da venda em PDF", content_type = "application/pdf"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_sale_pdf(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SalesExport>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state.document_service.generate_sale_pdf(id).await?;

    // Headers para o navegador baixar ou mostrar o PDF.
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"venda_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
