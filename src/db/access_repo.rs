use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, map_unique_violation},
        pagination::{ListParams, Page},
    },
    models::access::{GrantPayload, Menu, MenuAction, MenuPayload, Profile, ProfileMenuAction, ProfilePayload},
};

#[derive(Clone)]
pub struct AccessRepository {
    pool: PgPool,
}

impl AccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  A CONSULTA DA MATRIZ
    // =========================================================================

    /// A verificação central: o perfil tem a célula (menu, ação) concedida?
    pub async fn has_access(
        &self,
        profile_id: i32,
        menu_key: &str,
        action: MenuAction,
    ) -> Result<bool, AppError> {
        let granted: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM profile_menu_actions pma
                INNER JOIN menus m ON m.id = pma.menu_id
                WHERE pma.profile_id = $1
                  AND m.key = $2
                  AND pma.action = $3
            )
            "#,
        )
        .bind(profile_id)
        .bind(menu_key)
        .bind(action)
        .fetch_one(&self.pool)
        .await?;

        Ok(granted)
    }

    /// Menus visíveis para um perfil (ação 'view'), na ordem do cadastro.
    pub async fn menus_for_profile(&self, profile_id: i32) -> Result<Vec<Menu>, AppError> {
        let menus = sqlx::query_as::<_, Menu>(
            r#"
            SELECT DISTINCT m.*
            FROM menus m
            INNER JOIN profile_menu_actions pma ON pma.menu_id = m.id
            WHERE pma.profile_id = $1 AND pma.action = 'view'
            ORDER BY m.position, m.id
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    // =========================================================================
    //  PERFIS
    // =========================================================================

    pub async fn list_profiles(&self, params: &ListParams) -> Result<Page<Profile>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "name"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Profile>(&format!(
            "SELECT * FROM profiles WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM profiles WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_profile(&self, p: &ProfilePayload) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("Já existe um perfil '{}'.", p.name)))
    }

    pub async fn update_profile(&self, id: i32, p: &ProfilePayload) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET name = $1, description = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("Já existe um perfil '{}'.", p.name)))?
        .ok_or(AppError::NotFound("Perfil"))
    }

    pub async fn delete_profile(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Perfil"));
        }
        Ok(())
    }

    // =========================================================================
    //  MENUS
    // =========================================================================

    pub async fn list_menus(&self, params: &ListParams) -> Result<Page<Menu>, AppError> {
        let filter = "($1::text IS NULL OR key ILIKE $1 OR name ILIKE $1)";
        let order = params.order_clause(&["id", "key", "name", "position"], "position");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Menu>(&format!(
            "SELECT * FROM menus WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM menus WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_menu(&self, p: &MenuPayload) -> Result<Menu, AppError> {
        sqlx::query_as::<_, Menu>(
            "INSERT INTO menus (key, name, position) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&p.key)
        .bind(&p.name)
        .bind(p.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("Já existe um menu '{}'.", p.key)))
    }

    pub async fn update_menu(&self, id: i32, p: &MenuPayload) -> Result<Menu, AppError> {
        sqlx::query_as::<_, Menu>(
            "UPDATE menus SET key = $1, name = $2, position = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&p.key)
        .bind(&p.name)
        .bind(p.position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("Já existe um menu '{}'.", p.key)))?
        .ok_or(AppError::NotFound("Menu"))
    }

    pub async fn delete_menu(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Menu"));
        }
        Ok(())
    }

    // =========================================================================
    //  CÉLULAS DA MATRIZ
    // =========================================================================

    pub async fn list_grants(&self, profile_id: Option<i32>) -> Result<Vec<ProfileMenuAction>, AppError> {
        let grants = sqlx::query_as::<_, ProfileMenuAction>(
            r#"
            SELECT *
            FROM profile_menu_actions
            WHERE ($1::int IS NULL OR profile_id = $1)
            ORDER BY profile_id, menu_id, action
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grants)
    }

    pub async fn grant(&self, p: &GrantPayload) -> Result<ProfileMenuAction, AppError> {
        sqlx::query_as::<_, ProfileMenuAction>(
            r#"
            INSERT INTO profile_menu_actions (profile_id, menu_id, action)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(p.profile_id)
        .bind(p.menu_id)
        .bind(p.action)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Essa permissão já foi concedida."))
    }

    pub async fn revoke(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profile_menu_actions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Permissão"));
        }
        Ok(())
    }
}
