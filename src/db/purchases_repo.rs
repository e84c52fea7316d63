use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        pagination::{ListParams, Page},
    },
    models::purchases::{Purchase, PurchasePayload},
};

#[derive(Clone)]
pub struct PurchasesRepository {
    pool: PgPool,
}

impl PurchasesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_purchases(&self, params: &ListParams) -> Result<Page<Purchase>, AppError> {
        let filter = r#"(
            $1::text IS NULL
            OR invoice_number ILIKE $1
            OR supplier_id IN (SELECT id FROM suppliers WHERE name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "purchase_date", "total", "status"], "id");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT * FROM purchases WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM purchases WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_purchase(
        &self,
        user_id: i32,
        p: &PurchasePayload,
    ) -> Result<Purchase, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases
                (supplier_id, warehouse_id, user_id, invoice_number, purchase_date,
                 status, subtotal, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(p.supplier_id)
        .bind(p.warehouse_id)
        .bind(user_id)
        .bind(&p.invoice_number)
        .bind(p.purchase_date)
        .bind(p.status)
        .bind(p.subtotal)
        .bind(p.total)
        .fetch_one(&self.pool)
        .await?;

        Ok(purchase)
    }

    pub async fn update_purchase(&self, id: i32, p: &PurchasePayload) -> Result<Purchase, AppError> {
        sqlx::query_as::<_, Purchase>(
            r#"
            UPDATE purchases
            SET supplier_id = $1, warehouse_id = $2, invoice_number = $3,
                purchase_date = $4, status = $5, subtotal = $6, total = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(p.supplier_id)
        .bind(p.warehouse_id)
        .bind(&p.invoice_number)
        .bind(p.purchase_date)
        .bind(p.status)
        .bind(p.subtotal)
        .bind(p.total)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Compra"))
    }

    pub async fn delete_purchase(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Compra"));
        }
        Ok(())
    }
}
