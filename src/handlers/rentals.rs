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
        CourtsCreate, CourtsDelete, CourtsEdit, CourtsView, PlansCreate, PlansDelete, PlansEdit,
        PlansView, RentalsCreate, RentalsDelete, RentalsEdit, RentalsView, RequireAccess,
        SubscriptionsCreate, SubscriptionsDelete, SubscriptionsEdit, SubscriptionsView,
    },
    models::rentals::{
        Court, CourtPayload, Plan, PlanPayload, Rental, RentalPayload, Subscription,
        SubscriptionPayload,
    },
};

// =============================================================================
//  QUADRAS
// =============================================================================

// GET /api/courts
#[utoipa::path(
    get,
    path = "/api/courts",
    tag = "Locações",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de quadras")),
    security(("api_jwt" = []))
)]
pub async fn list_courts(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CourtsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.rentals_repo.list_courts(&params).await?))
}

// POST /api/courts
#[utoipa::path(
    post,
    path = "/api/courts",
    tag = "Locações",
    request_body = CourtPayload,
    responses((status = 201, description = "Quadra criada", body = Court)),
    security(("api_jwt" = []))
)]
pub async fn create_court(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CourtsCreate>,
    Json(payload): Json<CourtPayload>,
) -> Result<(StatusCode, Json<Court>), AppError> {
    payload.validate()?;
    let court = app_state.rentals_repo.create_court(&payload).await?;
    Ok((StatusCode::CREATED, Json(court)))
}

// PUT /api/courts/{id}
#[utoipa::path(
    put,
    path = "/api/courts/{id}",
    tag = "Locações",
    request_body = CourtPayload,
    responses((status = 200, description = "Quadra atualizada", body = Court)),
    security(("api_jwt" = []))
)]
pub async fn update_court(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CourtsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<CourtPayload>,
) -> Result<Json<Court>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.rentals_repo.update_court(id, &payload).await?))
}

// DELETE /api/courts/{id}
#[utoipa::path(
    delete,
    path = "/api/courts/{id}",
    tag = "Locações",
    responses((status = 204, description = "Quadra removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_court(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CourtsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.rentals_repo.delete_court(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  LOCAÇÕES
// =============================================================================

// GET /api/rentals
#[utoipa::path(
    get,
    path = "/api/rentals",
    tag = "Locações",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de locações")),
    security(("api_jwt" = []))
)]
pub async fn list_rentals(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RentalsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.rentals_repo.list_rentals(&params).await?))
}

// POST /api/rentals
#[utoipa::path(
    post,
    path = "/api/rentals",
    tag = "Locações",
    request_body = RentalPayload,
    responses((status = 201, description = "Locação criada", body = Rental)),
    security(("api_jwt" = []))
)]
pub async fn create_rental(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RentalsCreate>,
    Json(payload): Json<RentalPayload>,
) -> Result<(StatusCode, Json<Rental>), AppError> {
    let rental = app_state.rentals_repo.create_rental(&payload).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

// PUT /api/rentals/{id}
#[utoipa::path(
    put,
    path = "/api/rentals/{id}",
    tag = "Locações",
    request_body = RentalPayload,
    responses((status = 200, description = "Locação atualizada", body = Rental)),
    security(("api_jwt" = []))
)]
pub async fn update_rental(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RentalsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<RentalPayload>,
) -> Result<Json<Rental>, AppError> {
    Ok(Json(app_state.rentals_repo.update_rental(id, &payload).await?))
}

// DELETE /api/rentals/{id}
#[utoipa::path(
    delete,
    path = "/api/rentals/{id}",
    tag = "Locações",
    responses((status = 204, description = "Locação removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_rental(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RentalsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.rentals_repo.delete_rental(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PLANOS
// =============================================================================

// GET /api/plans
#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "Locações",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de planos")),
    security(("api_jwt" = []))
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PlansView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.rentals_repo.list_plans(&params).await?))
}

// POST /api/plans
#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "Locações",
    request_body = PlanPayload,
    responses((status = 201, description = "Plano criado", body = Plan)),
    security(("api_jwt" = []))
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PlansCreate>,
    Json(payload): Json<PlanPayload>,
) -> Result<(StatusCode, Json<Plan>), AppError> {
    payload.validate()?;
    let plan = app_state.rentals_repo.create_plan(&payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

// PUT /api/plans/{id}
#[utoipa::path(
    put,
    path = "/api/plans/{id}",
    tag = "Locações",
    request_body = PlanPayload,
    responses((status = 200, description = "Plano atualizado", body = Plan)),
    security(("api_jwt" = []))
)]
pub async fn update_plan(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PlansEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<PlanPayload>,
) -> Result<Json<Plan>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.rentals_repo.update_plan(id, &payload).await?))
}

// DELETE /api/plans/{id}
#[utoipa::path(
    delete,
    path = "/api/plans/{id}",
    tag = "Locações",
    responses((status = 204, description = "Plano removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_plan(
    State(app_state): State<AppState>,
    _perm: RequireAccess<PlansDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.rentals_repo.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ASSINATURAS
// =============================================================================

// GET /api/subscriptions
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = "Locações",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de assinaturas")),
    security(("api_jwt" = []))
)]
pub async fn list_subscriptions(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SubscriptionsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.rentals_repo.list_subscriptions(&params).await?))
}

// POST /api/subscriptions
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    tag = "Locações",
    request_body = SubscriptionPayload,
    responses((status = 201, description = "Assinatura criada", body = Subscription)),
    security(("api_jwt" = []))
)]
pub async fn create_subscription(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SubscriptionsCreate>,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<(StatusCode, Json<Subscription>), AppError> {
    let subscription = app_state.rentals_repo.create_subscription(&payload).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

// PUT /api/subscriptions/{id}
#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    tag = "Locações",
    request_body = SubscriptionPayload,
    responses((status = 200, description = "Assinatura atualizada", body = Subscription)),
    security(("api_jwt" = []))
)]
pub async fn update_subscription(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SubscriptionsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<Json<Subscription>, AppError> {
    Ok(Json(app_state.rentals_repo.update_subscription(id, &payload).await?))
}

// DELETE /api/subscriptions/{id}
#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    tag = "Locações",
    responses((status = 204, description = "Assinatura removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_subscription(
    State(app_state): State<AppState>,
    _perm: RequireAccess<SubscriptionsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.rentals_repo.delete_subscription(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
