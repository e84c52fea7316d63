use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, map_unique_violation},
        pagination::{ListParams, Page},
    },
    models::cash::{
        CashRegister, CashRegisterLog, CashRegisterPayload, ExpenseType, ExpenseTypePayload,
    },
};

#[derive(Clone)]
pub struct CashRepository {
    pool: PgPool,
}

impl CashRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CAIXAS
    // =========================================================================

    pub async fn list_registers(&self, params: &ListParams) -> Result<Page<CashRegister>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1)";
        let order = params.order_clause(&["id", "name", "local_id"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, CashRegister>(&format!(
            "SELECT * FROM cash_registers WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM cash_registers WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn find_register(&self, id: i32) -> Result<CashRegister, AppError> {
        sqlx::query_as::<_, CashRegister>("SELECT * FROM cash_registers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Caixa"))
    }

    pub async fn create_register(&self, p: &CashRegisterPayload) -> Result<CashRegister, AppError> {
        let register = sqlx::query_as::<_, CashRegister>(
            r#"
            INSERT INTO cash_registers (local_id, name, is_active)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.name)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(register)
    }

    pub async fn update_register(
        &self,
        id: i32,
        p: &CashRegisterPayload,
    ) -> Result<CashRegister, AppError> {
        sqlx::query_as::<_, CashRegister>(
            r#"
            UPDATE cash_registers
            SET local_id = $1, name = $2, is_active = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.name)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Caixa"))
    }

    pub async fn delete_register(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cash_registers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Caixa"));
        }
        Ok(())
    }

    // =========================================================================
    //  DIÁRIO DE CAIXA
    // =========================================================================

    pub async fn find_open_log(&self, register_id: i32) -> Result<Option<CashRegisterLog>, AppError> {
        let log = sqlx::query_as::<_, CashRegisterLog>(
            "SELECT * FROM cash_register_logs WHERE cash_register_id = $1 AND status = 'open'",
        )
        .bind(register_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn list_logs(&self, register_id: i32) -> Result<Vec<CashRegisterLog>, AppError> {
        let logs = sqlx::query_as::<_, CashRegisterLog>(
            "SELECT * FROM cash_register_logs WHERE cash_register_id = $1 ORDER BY log_date DESC, id DESC",
        )
        .bind(register_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn open_log(
        &self,
        register_id: i32,
        log_date: NaiveDate,
        opening_amount: Decimal,
        opened_by: i32,
    ) -> Result<CashRegisterLog, AppError> {
        let log = sqlx::query_as::<_, CashRegisterLog>(
            r#"
            INSERT INTO cash_register_logs (cash_register_id, log_date, opening_amount, opened_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(register_id)
        .bind(log_date)
        .bind(opening_amount)
        .bind(opened_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn close_log(
        &self,
        log_id: i32,
        closing_amount: Decimal,
        closed_by: i32,
    ) -> Result<CashRegisterLog, AppError> {
        sqlx::query_as::<_, CashRegisterLog>(
            r#"
            UPDATE cash_register_logs
            SET closing_amount = $1, closed_by = $2, status = 'closed'
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(closing_amount)
        .bind(closed_by)
        .bind(log_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Diário de caixa"))
    }

    // =========================================================================
    //  TIPOS DE GASTO
    // =========================================================================

    pub async fn list_expense_types(&self, params: &ListParams) -> Result<Page<ExpenseType>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "name"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, ExpenseType>(&format!(
            "SELECT * FROM expense_types WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM expense_types WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_expense_type(&self, p: &ExpenseTypePayload) -> Result<ExpenseType, AppError> {
        sqlx::query_as::<_, ExpenseType>(
            "INSERT INTO expense_types (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("O tipo de gasto '{}' já existe.", p.name)))
    }

    pub async fn update_expense_type(
        &self,
        id: i32,
        p: &ExpenseTypePayload,
    ) -> Result<ExpenseType, AppError> {
        sqlx::query_as::<_, ExpenseType>(
            "UPDATE expense_types SET name = $1, description = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("O tipo de gasto '{}' já existe.", p.name)))?
        .ok_or(AppError::NotFound("Tipo de gasto"))
    }

    pub async fn delete_expense_type(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expense_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tipo de gasto"));
        }
        Ok(())
    }
}
