use crate::{
    common::error::AppError,
    db::AccessRepository,
    models::access::{Menu, MenuAction},
};

// Fachada fina sobre a matriz de permissões. Uma consulta por requisição,
// sem cache.
#[derive(Clone)]
pub struct AccessService {
    repo: AccessRepository,
}

impl AccessService {
    pub fn new(repo: AccessRepository) -> Self {
        Self { repo }
    }

    pub async fn has_access(
        &self,
        profile_id: i32,
        menu_key: &str,
        action: MenuAction,
    ) -> Result<bool, AppError> {
        self.repo.has_access(profile_id, menu_key, action).await
    }

    /// Menus que o perfil pode ver, para montar a navegação do frontend.
    pub async fn my_menus(&self, profile_id: i32) -> Result<Vec<Menu>, AppError> {
        self.repo.menus_for_profile(profile_id).await
    }
}
