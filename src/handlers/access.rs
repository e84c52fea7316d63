use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::pagination::ListParams,
    config::AppState,
    middleware::access::{
        MenusCreate, MenusDelete, MenusEdit, MenusView, ProfilesCreate, ProfilesDelete,
        ProfilesEdit, ProfilesView, RequireAccess, UsersCreate, UsersDelete, UsersEdit, UsersView,
    },
    middleware::auth::AuthenticatedUser,
    models::access::{GrantPayload, Menu, MenuPayload, Profile, ProfileMenuAction, ProfilePayload},
    models::auth::{User, UserPayload},
};

// =============================================================================
//  USUÁRIOS
// =============================================================================

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Acesso",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de usuários")),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _perm: RequireAccess<UsersView>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(Json(app_state.user_repo.list_users(&params).await?))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Acesso",
    request_body = UserPayload,
    responses((status = 201, description = "Usuário criado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _perm: RequireAccess<UsersCreate>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    // A senha é obrigatória na criação e opcional na edição.
    let password = payload.password.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity("A senha é obrigatória na criação.".into())
    })?;
    let hash = app_state.auth_service.hash_password(password).await?;

    let user = app_state.user_repo.create_user(&payload, &hash).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Acesso",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _perm: RequireAccess<UsersEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let hash = match payload.password.as_deref() {
        Some(password) => Some(app_state.auth_service.hash_password(password).await?),
        None => None,
    };

    let user = app_state
        .user_repo
        .update_user(id, &payload, hash.as_deref())
        .await?;
    Ok(Json(user))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Acesso",
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _perm: RequireAccess<UsersDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.user_repo.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PERFIS
// =============================================================================

// GET /api/profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "Acesso",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de perfis")),
    security(("api_jwt" = []))
)]
pub async fn list_profiles(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesView>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(Json(app_state.access_repo.list_profiles(&params).await?))
}

// POST /api/profiles
#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "Acesso",
    request_body = ProfilePayload,
    responses((status = 201, description = "Perfil criado", body = Profile)),
    security(("api_jwt" = []))
)]
pub async fn create_profile(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesCreate>,
    Json(payload): Json<ProfilePayload>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    payload.validate()?;
    let profile = app_state.access_repo.create_profile(&payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

// PUT /api/profiles/{id}
#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    tag = "Acesso",
    request_body = ProfilePayload,
    responses((status = 200, description = "Perfil atualizado", body = Profile)),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Profile>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.access_repo.update_profile(id, &payload).await?))
}

// DELETE /api/profiles/{id}
#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    tag = "Acesso",
    responses((status = 204, description = "Perfil removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_profile(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.access_repo.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  MENUS
// =============================================================================

// GET /api/menus
#[utoipa::path(
    get,
    path = "/api/menus",
    tag = "Acesso",
    params(ListParams),
    responses((status = 200, description = "Lista paginada de menus")),
    security(("api_jwt" = []))
)]
pub async fn list_menus(
    State(app_state): State<AppState>,
    _perm: RequireAccess<MenusView>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(Json(app_state.access_repo.list_menus(&params).await?))
}

// POST /api/menus
#[utoipa::path(
    post,
    path = "/api/menus",
    tag = "Acesso",
    request_body = MenuPayload,
    responses((status = 201, description = "Menu criado", body = Menu)),
    security(("api_jwt" = []))
)]
pub async fn create_menu(
    State(app_state): State<AppState>,
    _perm: RequireAccess<MenusCreate>,
    Json(payload): Json<MenuPayload>,
) -> Result<(StatusCode, Json<Menu>), AppError> {
    payload.validate()?;
    let menu = app_state.access_repo.create_menu(&payload).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

// PUT /api/menus/{id}
#[utoipa::path(
    put,
    path = "/api/menus/{id}",
    tag = "Acesso",
    request_body = MenuPayload,
    responses((status = 200, description = "Menu atualizado", body = Menu)),
    security(("api_jwt" = []))
)]
pub async fn update_menu(
    State(app_state): State<AppState>,
    _perm: RequireAccess<MenusEdit>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuPayload>,
) -> Result<Json<Menu>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.access_repo.update_menu(id, &payload).await?))
}

// DELETE /api/menus/{id}
#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    tag = "Acesso",
    responses((status = 204, description = "Menu removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_menu(
    State(app_state): State<AppState>,
    _perm: RequireAccess<MenusDelete>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.access_repo.delete_menu(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  MATRIZ DE PERMISSÕES
// =============================================================================

// GET /api/access/me/menus — navegação do usuário logado.
#[utoipa::path(
    get,
    path = "/api/access/me/menus",
    tag = "Acesso",
    responses((status = 200, description = "Menus visíveis para o perfil", body = Vec<Menu>)),
    security(("api_jwt" = []))
)]
pub async fn my_menus(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Menu>>, AppError> {
    Ok(Json(app_state.access_service.my_menus(user.profile_id).await?))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GrantFilter {
    pub profile_id: Option<i32>,
}

// GET /api/access/permissions
#[utoipa::path(
    get,
    path = "/api/access/permissions",
    tag = "Acesso",
    params(GrantFilter),
    responses((status = 200, description = "Células concedidas da matriz", body = Vec<ProfileMenuAction>)),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesView>,
    Query(filter): Query<GrantFilter>,
) -> Result<Json<Vec<ProfileMenuAction>>, AppError> {
    Ok(Json(app_state.access_repo.list_grants(filter.profile_id).await?))
}

// POST /api/access/permissions
#[utoipa::path(
    post,
    path = "/api/access/permissions",
    tag = "Acesso",
    request_body = GrantPayload,
    responses(
        (status = 201, description = "Célula concedida", body = ProfileMenuAction),
        (status = 409, description = "Já concedida")
    ),
    security(("api_jwt" = []))
)]
pub async fn grant_permission(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesEdit>,
    Json(payload): Json<GrantPayload>,
) -> Result<(StatusCode, Json<ProfileMenuAction>), AppError> {
    let grant = app_state.access_repo.grant(&payload).await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

// DELETE /api/access/permissions/{id}
#[utoipa::path(
    delete,
    path = "/api/access/permissions/{id}",
    tag = "Acesso",
    responses((status = 204, description = "Célula revogada")),
    security(("api_jwt" = []))
)]
pub async fn revoke_permission(
    State(app_state): State<AppState>,
    _perm: RequireAccess<ProfilesEdit>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.access_repo.revoke(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
