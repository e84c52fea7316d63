use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, map_unique_violation},
        pagination::{ListParams, Page},
    },
    models::auth::{User, UserPayload},
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Usuário"))
    }

    pub async fn list_users(&self, params: &ListParams) -> Result<Page<User>, AppError> {
        let filter = "($1::text IS NULL OR username ILIKE $1 OR full_name ILIKE $1 OR email ILIKE $1)";
        let order = params.order_clause(&["id", "username", "full_name", "email"], "username");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_user(&self, p: &UserPayload, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, full_name, password_hash, profile_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&p.username)
        .bind(&p.email)
        .bind(&p.full_name)
        .bind(password_hash)
        .bind(p.profile_id)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Usuário ou e-mail já cadastrado."))
    }

    // `password_hash` = None mantém a senha atual.
    pub async fn update_user(
        &self,
        id: i32,
        p: &UserPayload,
        password_hash: Option<&str>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2, full_name = $3,
                password_hash = COALESCE($4, password_hash),
                profile_id = $5, is_active = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&p.username)
        .bind(&p.email)
        .bind(&p.full_name)
        .bind(password_hash)
        .bind(p.profile_id)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Usuário ou e-mail já cadastrado."))?
        .ok_or(AppError::NotFound("Usuário"))
    }

    pub async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuário"));
        }
        Ok(())
    }
}
