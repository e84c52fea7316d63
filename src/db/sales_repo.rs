use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::{
    common::{
        error::AppError,
        pagination::{ListParams, Page},
    },
    models::sales::{
        InvoiceRange, InvoiceRangePayload, PaymentKind, Sale, SaleCredit, SaleCreditPayment,
        SaleProduct, SaleStatus,
    },
};

// Cabeçalho de venda já computado pelo serviço, pronto para inserir.
pub struct NewSale {
    pub client_id: i32,
    pub local_id: i32,
    pub user_id: i32,
    pub invoice_serie: Option<String>,
    pub invoice_number: Option<i64>,
    pub sale_date: NaiveDate,
    pub status: SaleStatus,
    pub payment_kind: PaymentKind,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  RANGOS DE FACTURA
    // =========================================================================

    pub async fn list_invoice_ranges(
        &self,
        params: &ListParams,
    ) -> Result<Page<InvoiceRange>, AppError> {
        let filter = "($1::text IS NULL OR serie ILIKE $1 OR authorization_code ILIKE $1)";
        let order = params.order_clause(&["id", "serie", "range_start", "expires_on"], "serie");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, InvoiceRange>(&format!(
            "SELECT * FROM invoice_ranges WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM invoice_ranges WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    /// Conta rangos da mesma série/local que se sobrepõem a [start, end],
    /// ignorando `exclude_id` (para o caso de update).
    pub async fn count_overlapping_ranges(
        &self,
        local_id: i32,
        serie: &str,
        start: i64,
        end: i64,
        exclude_id: Option<i32>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM invoice_ranges
            WHERE local_id = $1
              AND serie = $2
              AND range_start <= $4
              AND $3 <= range_end
              AND ($5::int IS NULL OR id <> $5)
            "#,
        )
        .bind(local_id)
        .bind(serie)
        .bind(start)
        .bind(end)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn create_invoice_range(
        &self,
        p: &InvoiceRangePayload,
    ) -> Result<InvoiceRange, AppError> {
        let range = sqlx::query_as::<_, InvoiceRange>(
            r#"
            INSERT INTO invoice_ranges
                (local_id, serie, range_start, range_end, current_number,
                 authorization_code, expires_on, is_active)
            VALUES ($1, $2, $3, $4, $3, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.serie)
        .bind(p.range_start)
        .bind(p.range_end)
        .bind(&p.authorization_code)
        .bind(p.expires_on)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(range)
    }

    pub async fn update_invoice_range(
        &self,
        id: i32,
        p: &InvoiceRangePayload,
    ) -> Result<InvoiceRange, AppError> {
        sqlx::query_as::<_, InvoiceRange>(
            r#"
            UPDATE invoice_ranges
            SET local_id = $1, serie = $2, range_start = $3, range_end = $4,
                authorization_code = $5, expires_on = $6, is_active = $7,
                current_number = GREATEST(current_number, $3)
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.serie)
        .bind(p.range_start)
        .bind(p.range_end)
        .bind(&p.authorization_code)
        .bind(p.expires_on)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Rango de fatura"))
    }

    pub async fn delete_invoice_range(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM invoice_ranges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rango de fatura"));
        }
        Ok(())
    }

    /// Trava o rango ativo do local para atribuir o próximo número.
    pub async fn find_active_range_for_update(
        &self,
        conn: &mut PgConnection,
        local_id: i32,
    ) -> Result<Option<InvoiceRange>, AppError> {
        let range = sqlx::query_as::<_, InvoiceRange>(
            r#"
            SELECT *
            FROM invoice_ranges
            WHERE local_id = $1 AND is_active = TRUE
            ORDER BY id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(local_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(range)
    }

    pub async fn advance_range_number(
        &self,
        conn: &mut PgConnection,
        range_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE invoice_ranges SET current_number = current_number + 1 WHERE id = $1")
            .bind(range_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    pub async fn list_sales(&self, params: &ListParams) -> Result<Page<Sale>, AppError> {
        // Busca por série da fatura ou pelo nome do cliente, sem JOIN no SELECT
        // para manter o FromRow direto.
        let filter = r#"(
            $1::text IS NULL
            OR invoice_serie ILIKE $1
            OR client_id IN (SELECT id FROM clients WHERE full_name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "sale_date", "total", "status"], "id");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Sale>(&format!(
            "SELECT * FROM sales WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM sales WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn find_sale(&self, id: i32) -> Result<Sale, AppError> {
        sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Venda"))
    }

    pub async fn list_sale_products(&self, sale_id: i32) -> Result<Vec<SaleProduct>, AppError> {
        let products = sqlx::query_as::<_, SaleProduct>(
            "SELECT * FROM sale_products WHERE sale_id = $1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn insert_sale(
        &self,
        conn: &mut PgConnection,
        s: &NewSale,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (client_id, local_id, user_id, invoice_serie, invoice_number,
                 sale_date, status, payment_kind, subtotal, discount, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(s.client_id)
        .bind(s.local_id)
        .bind(s.user_id)
        .bind(&s.invoice_serie)
        .bind(s.invoice_number)
        .bind(s.sale_date)
        .bind(s.status)
        .bind(s.payment_kind)
        .bind(s.subtotal)
        .bind(s.discount)
        .bind(s.total)
        .fetch_one(&mut *conn)
        .await?;

        Ok(sale)
    }

    pub async fn insert_sale_product(
        &self,
        conn: &mut PgConnection,
        sale_id: i32,
        product_id: i32,
        quantity: Decimal,
        unit_price: Decimal,
        discount: Decimal,
        line_total: Decimal,
    ) -> Result<SaleProduct, AppError> {
        let line = sqlx::query_as::<_, SaleProduct>(
            r#"
            INSERT INTO sale_products (sale_id, product_id, quantity, unit_price, discount, line_total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(discount)
        .bind(line_total)
        .fetch_one(&mut *conn)
        .await?;

        Ok(line)
    }

    /// Trava o produto e devolve (preço de tabela, estoque atual).
    pub async fn find_product_for_update(
        &self,
        conn: &mut PgConnection,
        product_id: i32,
    ) -> Result<Option<(Decimal, i32)>, AppError> {
        let row: Option<(Decimal, i32)> =
            sqlx::query_as("SELECT price, stock FROM products WHERE id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(row)
    }

    pub async fn decrement_stock(
        &self,
        conn: &mut PgConnection,
        product_id: i32,
        quantity: Decimal,
    ) -> Result<(), AppError> {
        // O estoque é inteiro; quantidades fracionadas arredondam para cima.
        sqlx::query("UPDATE products SET stock = stock - CEIL($1)::INT WHERE id = $2")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn update_sale_status(&self, id: i32, status: SaleStatus) -> Result<Sale, AppError> {
        sqlx::query_as::<_, Sale>("UPDATE sales SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Venda"))
    }

    pub async fn delete_sale(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venda"));
        }
        Ok(())
    }

    // =========================================================================
    //  CRÉDITOS E PAGAMENTOS
    // =========================================================================

    pub async fn insert_credit(
        &self,
        conn: &mut PgConnection,
        sale_id: i32,
        total: Decimal,
        due_date: Option<NaiveDate>,
    ) -> Result<SaleCredit, AppError> {
        let credit = sqlx::query_as::<_, SaleCredit>(
            r#"
            INSERT INTO sale_credits (sale_id, total, due_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(total)
        .bind(due_date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(credit)
    }

    pub async fn find_credit_by_sale(&self, sale_id: i32) -> Result<SaleCredit, AppError> {
        sqlx::query_as::<_, SaleCredit>("SELECT * FROM sale_credits WHERE sale_id = $1")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Crédito"))
    }

    /// Versão com trava, usada ao registrar um pagamento.
    pub async fn find_credit_by_sale_for_update(
        &self,
        conn: &mut PgConnection,
        sale_id: i32,
    ) -> Result<SaleCredit, AppError> {
        sqlx::query_as::<_, SaleCredit>(
            "SELECT * FROM sale_credits WHERE sale_id = $1 FOR UPDATE",
        )
        .bind(sale_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::NotFound("Crédito"))
    }

    pub async fn list_credit_payments(
        &self,
        credit_id: i32,
    ) -> Result<Vec<SaleCreditPayment>, AppError> {
        let payments = sqlx::query_as::<_, SaleCreditPayment>(
            "SELECT * FROM sale_credit_payments WHERE sale_credit_id = $1 ORDER BY paid_on, id",
        )
        .bind(credit_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn sum_credit_payments(
        &self,
        conn: &mut PgConnection,
        credit_id: i32,
    ) -> Result<Decimal, AppError> {
        let paid: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM sale_credit_payments WHERE sale_credit_id = $1",
        )
        .bind(credit_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(paid)
    }

    pub async fn insert_credit_payment(
        &self,
        conn: &mut PgConnection,
        credit_id: i32,
        amount: Decimal,
        paid_on: NaiveDate,
        note: Option<&str>,
    ) -> Result<SaleCreditPayment, AppError> {
        let payment = sqlx::query_as::<_, SaleCreditPayment>(
            r#"
            INSERT INTO sale_credit_payments (sale_credit_id, amount, paid_on, note)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(credit_id)
        .bind(amount)
        .bind(paid_on)
        .bind(note)
        .fetch_one(&mut *conn)
        .await?;

        Ok(payment)
    }

    pub async fn settle_credit(
        &self,
        conn: &mut PgConnection,
        credit_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE sale_credits SET status = 'settled' WHERE id = $1")
            .bind(credit_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Conclui a venda pendente quando o crédito correspondente quita.
    pub async fn complete_pending_sale(
        &self,
        conn: &mut PgConnection,
        sale_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE sales SET status = 'completed' WHERE id = $1 AND status = 'pending'")
            .bind(sale_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
