use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        pagination::{ListParams, Page},
    },
    models::parties::{Client, ClientPayload, School, SchoolPayload, Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct PartiesRepository {
    pool: PgPool,
}

impl PartiesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn list_clients(&self, params: &ListParams) -> Result<Page<Client>, AppError> {
        let filter =
            "($1::text IS NULL OR full_name ILIKE $1 OR document_number ILIKE $1 OR email ILIKE $1)";
        let order = params.order_clause(&["id", "full_name", "document_number", "email"], "full_name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Client>(&format!(
            "SELECT * FROM clients WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM clients WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn find_client(&self, id: i32) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn create_client(&self, p: &ClientPayload) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (document_number, full_name, email, phone, address, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&p.document_number)
        .bind(&p.full_name)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.address)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn update_client(&self, id: i32, p: &ClientPayload) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET document_number = $1, full_name = $2, email = $3,
                phone = $4, address = $5, is_active = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&p.document_number)
        .bind(&p.full_name)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.address)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn delete_client(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn list_suppliers(&self, params: &ListParams) -> Result<Page<Supplier>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR tax_id ILIKE $1 OR email ILIKE $1)";
        let order = params.order_clause(&["id", "name", "tax_id"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT * FROM suppliers WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM suppliers WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_supplier(&self, p: &SupplierPayload) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, tax_id, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.tax_id)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    pub async fn update_supplier(&self, id: i32, p: &SupplierPayload) -> Result<Supplier, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, tax_id = $2, email = $3, phone = $4, address = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.tax_id)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Fornecedor"))
    }

    pub async fn delete_supplier(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fornecedor"));
        }
        Ok(())
    }

    // =========================================================================
    //  COLÉGIOS
    // =========================================================================

    pub async fn list_schools(&self, params: &ListParams) -> Result<Page<School>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR contact_name ILIKE $1)";
        let order = params.order_clause(&["id", "name"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, School>(&format!(
            "SELECT * FROM schools WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM schools WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_school(&self, p: &SchoolPayload) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(
            r#"
            INSERT INTO schools (name, address, contact_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.address)
        .bind(&p.contact_name)
        .bind(&p.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(school)
    }

    pub async fn update_school(&self, id: i32, p: &SchoolPayload) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(
            r#"
            UPDATE schools
            SET name = $1, address = $2, contact_name = $3, phone = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.address)
        .bind(&p.contact_name)
        .bind(&p.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Colégio"))
    }

    pub async fn delete_school(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Colégio"));
        }
        Ok(())
    }
}
