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
        CompetitionsCreate, CompetitionsDelete, CompetitionsEdit, CompetitionsView,
        RankingsCreate, RankingsDelete, RankingsEdit, RankingsView, RequireAccess,
        TournamentsCreate, TournamentsDelete, TournamentsEdit, TournamentsView,
    },
    models::tournaments::{
        Competition, CompetitionPayload, Ranking, RankingPayload, Tournament, TournamentPayload,
    },
};

// =============================================================================
//  COMPETÊNCIAS
// =============================================================================

// GET /api/competitions
#[utoipa::path(
    get,
    path = "/api/competitions",
    tag = "Torneios",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de competências")),
    security(("api_jwt" = []))
)]
pub async fn list_competitions(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CompetitionsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tournaments_repo.list_competitions(&params).await?))
}

// POST /api/competitions
#[utoipa::path(
    post,
    path = "/api/competitions",
    tag = "Torneios",
    request_body = CompetitionPayload,
    responses((status = 201, description = "Competência criada", body = Competition)),
    security(("api_jwt" = []))
)]
pub async fn create_competition(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CompetitionsCreate>,
    Json(payload): Json<CompetitionPayload>,
) -> Result<(StatusCode, Json<Competition>), AppError> {
    payload.validate()?;
    let competition = app_state.tournaments_repo.create_competition(&payload).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

// PUT /api/competitions/{id}
#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    tag = "Torneios",
    request_body = CompetitionPayload,
    responses((status = 200, description = "Competência atualizada", body = Competition)),
    security(("api_jwt" = []))
)]
pub async fn update_competition(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CompetitionsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<CompetitionPayload>,
) -> Result<Json<Competition>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.tournaments_repo.update_competition(id, &payload).await?))
}

// DELETE /api/competitions/{id}
#[utoipa::path(
    delete,
    path = "/api/competitions/{id}",
    tag = "Torneios",
    responses((status = 204, description = "Competência removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_competition(
    State(app_state): State<AppState>,
    _perm: RequireAccess<CompetitionsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.tournaments_repo.delete_competition(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  TORNEIOS
// =============================================================================

// GET /api/tournaments
#[utoipa::path(
    get,
    path = "/api/tournaments",
    tag = "Torneios",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de torneios")),
    security(("api_jwt" = []))
)]
pub async fn list_tournaments(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TournamentsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tournaments_repo.list_tournaments(&params).await?))
}

// POST /api/tournaments
#[utoipa::path(
    post,
    path = "/api/tournaments",
    tag = "Torneios",
    request_body = TournamentPayload,
    responses((status = 201, description = "Torneio criado", body = Tournament)),
    security(("api_jwt" = []))
)]
pub async fn create_tournament(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TournamentsCreate>,
    Json(payload): Json<TournamentPayload>,
) -> Result<(StatusCode, Json<Tournament>), AppError> {
    payload.validate()?;
    let tournament = app_state.tournaments_repo.create_tournament(&payload).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

// PUT /api/tournaments/{id}
#[utoipa::path(
    put,
    path = "/api/tournaments/{id}",
    tag = "Torneios",
    request_body = TournamentPayload,
    responses((status = 200, description = "Torneio atualizado", body = Tournament)),
    security(("api_jwt" = []))
)]
pub async fn update_tournament(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TournamentsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<TournamentPayload>,
) -> Result<Json<Tournament>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.tournaments_repo.update_tournament(id, &payload).await?))
}

// DELETE /api/tournaments/{id}
#[utoipa::path(
    delete,
    path = "/api/tournaments/{id}",
    tag = "Torneios",
    responses((status = 204, description = "Torneio removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_tournament(
    State(app_state): State<AppState>,
    _perm: RequireAccess<TournamentsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.tournaments_repo.delete_tournament(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  RANKINGS
// =============================================================================

// GET /api/rankings
#[utoipa::path(
    get,
    path = "/api/rankings",
    tag = "Torneios",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de rankings")),
    security(("api_jwt" = []))
)]
pub async fn list_rankings(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RankingsView>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tournaments_repo.list_rankings(&params).await?))
}

// POST /api/rankings
#[utoipa::path(
    post,
    path = "/api/rankings",
    tag = "Torneios",
    request_body = RankingPayload,
    responses(
        (status = 201, description = "Ranking criado", body = Ranking),
        (status = 409, description = "Cliente já está no ranking")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ranking(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RankingsCreate>,
    Json(payload): Json<RankingPayload>,
) -> Result<(StatusCode, Json<Ranking>), AppError> {
    let ranking = app_state.tournaments_repo.create_ranking(&payload).await?;
    Ok((StatusCode::CREATED, Json(ranking)))
}

// PUT /api/rankings/{id}
#[utoipa::path(
    put,
    path = "/api/rankings/{id}",
    tag = "Torneios",
    request_body = RankingPayload,
    responses((status = 200, description = "Ranking atualizado", body = Ranking)),
    security(("api_jwt" = []))
)]
pub async fn update_ranking(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RankingsEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<RankingPayload>,
) -> Result<Json<Ranking>, AppError> {
    Ok(Json(app_state.tournaments_repo.update_ranking(id, &payload).await?))
}

// DELETE /api/rankings/{id}
#[utoipa::path(
    delete,
    path = "/api/rankings/{id}",
    tag = "Torneios",
    responses((status = 204, description = "Ranking removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_ranking(
    State(app_state): State<AppState>,
    _perm: RequireAccess<RankingsDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.tournaments_repo.delete_ranking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
