use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, map_unique_violation},
        pagination::{ListParams, Page},
    },
    models::catalog::{
        Combo, ComboPayload, Currency, CurrencyPayload, Local, LocalPayload, Product,
        ProductPayload, Transport, TransportPayload, Warehouse, WarehousePayload,
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LOCALES
    // =========================================================================

    pub async fn list_locals(&self, params: &ListParams) -> Result<Page<Local>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR address ILIKE $1)";
        let order = params.order_clause(&["id", "name"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Local>(&format!(
            "SELECT * FROM locals WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM locals WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_local(&self, p: &LocalPayload) -> Result<Local, AppError> {
        let local = sqlx::query_as::<_, Local>(
            "INSERT INTO locals (name, address, phone) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.address)
        .bind(&p.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(local)
    }

    pub async fn update_local(&self, id: i32, p: &LocalPayload) -> Result<Local, AppError> {
        sqlx::query_as::<_, Local>(
            "UPDATE locals SET name = $1, address = $2, phone = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.address)
        .bind(&p.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Local"))
    }

    pub async fn delete_local(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM locals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Local"));
        }
        Ok(())
    }

    // =========================================================================
    //  ALMACENES
    // =========================================================================

    pub async fn list_warehouses(&self, params: &ListParams) -> Result<Page<Warehouse>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "name", "local_id"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Warehouse>(&format!(
            "SELECT * FROM warehouses WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM warehouses WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_warehouse(&self, p: &WarehousePayload) -> Result<Warehouse, AppError> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, local_id, description, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(p.local_id)
        .bind(&p.description)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(warehouse)
    }

    pub async fn update_warehouse(
        &self,
        id: i32,
        p: &WarehousePayload,
    ) -> Result<Warehouse, AppError> {
        sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses
            SET name = $1, local_id = $2, description = $3, is_active = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(p.local_id)
        .bind(&p.description)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Armazém"))
    }

    pub async fn delete_warehouse(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Armazém"));
        }
        Ok(())
    }

    // =========================================================================
    //  PRODUCTOS
    // =========================================================================

    pub async fn list_products(&self, params: &ListParams) -> Result<Page<Product>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR code ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "code", "name", "price", "stock"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT * FROM products WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM products WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_product(&self, p: &ProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (code, name, description, price, cost, stock, warehouse_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&p.code)
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .bind(p.cost)
        .bind(p.stock)
        .bind(p.warehouse_id)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("O código '{}' já existe.", p.code)))
    }

    pub async fn update_product(&self, id: i32, p: &ProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET code = $1, name = $2, description = $3, price = $4,
                cost = $5, stock = $6, warehouse_id = $7, is_active = $8
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&p.code)
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .bind(p.cost)
        .bind(p.stock)
        .bind(p.warehouse_id)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("O código '{}' já existe.", p.code)))?
        .ok_or(AppError::NotFound("Produto"))
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto"));
        }
        Ok(())
    }

    // =========================================================================
    //  COMBOS
    // =========================================================================

    pub async fn list_combos(&self, params: &ListParams) -> Result<Page<Combo>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "name", "price"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Combo>(&format!(
            "SELECT * FROM combos WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM combos WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_combo(&self, p: &ComboPayload) -> Result<Combo, AppError> {
        let combo = sqlx::query_as::<_, Combo>(
            r#"
            INSERT INTO combos (name, description, price, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(combo)
    }

    pub async fn update_combo(&self, id: i32, p: &ComboPayload) -> Result<Combo, AppError> {
        sqlx::query_as::<_, Combo>(
            r#"
            UPDATE combos
            SET name = $1, description = $2, price = $3, is_active = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Combo"))
    }

    pub async fn delete_combo(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM combos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Combo"));
        }
        Ok(())
    }

    // =========================================================================
    //  TRANSPORTES
    // =========================================================================

    pub async fn list_transports(&self, params: &ListParams) -> Result<Page<Transport>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR plate ILIKE $1 OR driver_name ILIKE $1)";
        let order = params.order_clause(&["id", "name", "plate"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Transport>(&format!(
            "SELECT * FROM transports WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM transports WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_transport(&self, p: &TransportPayload) -> Result<Transport, AppError> {
        let transport = sqlx::query_as::<_, Transport>(
            r#"
            INSERT INTO transports (name, plate, driver_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.plate)
        .bind(&p.driver_name)
        .bind(&p.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(transport)
    }

    pub async fn update_transport(
        &self,
        id: i32,
        p: &TransportPayload,
    ) -> Result<Transport, AppError> {
        sqlx::query_as::<_, Transport>(
            r#"
            UPDATE transports
            SET name = $1, plate = $2, driver_name = $3, phone = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.plate)
        .bind(&p.driver_name)
        .bind(&p.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Transporte"))
    }

    pub async fn delete_transport(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transporte"));
        }
        Ok(())
    }

    // =========================================================================
    //  DIVISAS
    // =========================================================================

    pub async fn list_currencies(&self, params: &ListParams) -> Result<Page<Currency>, AppError> {
        let filter = "($1::text IS NULL OR code ILIKE $1 OR name ILIKE $1)";
        let order = params.order_clause(&["id", "code", "name", "exchange_rate"], "code");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Currency>(&format!(
            "SELECT * FROM currencies WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM currencies WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_currency(&self, p: &CurrencyPayload) -> Result<Currency, AppError> {
        sqlx::query_as::<_, Currency>(
            r#"
            INSERT INTO currencies (code, name, symbol, exchange_rate)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.code)
        .bind(&p.name)
        .bind(&p.symbol)
        .bind(p.exchange_rate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("A divisa '{}' já existe.", p.code)))
    }

    pub async fn update_currency(&self, id: i32, p: &CurrencyPayload) -> Result<Currency, AppError> {
        sqlx::query_as::<_, Currency>(
            r#"
            UPDATE currencies
            SET code = $1, name = $2, symbol = $3, exchange_rate = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.code)
        .bind(&p.name)
        .bind(&p.symbol)
        .bind(p.exchange_rate)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("A divisa '{}' já existe.", p.code)))?
        .ok_or(AppError::NotFound("Divisa"))
    }

    pub async fn delete_currency(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Divisa"));
        }
        Ok(())
    }
}
