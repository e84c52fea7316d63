use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{SalesRepository, sales_repo::NewSale},
    models::sales::{
        CreateSalePayload, CreditPaymentPayload, InvoiceRange, InvoiceRangePayload, PaymentKind,
        Sale, SaleCreditDetail, SaleDetail, SaleStatus, credit_balance, resolve_line_total,
    },
};

#[derive(Clone)]
pub struct SalesService {
    repo: SalesRepository,
    pool: PgPool,
}

impl SalesService {
    pub fn new(repo: SalesRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // =========================================================================
    //  RANGOS DE FACTURA
    // =========================================================================

    pub async fn create_invoice_range(
        &self,
        p: &InvoiceRangePayload,
    ) -> Result<InvoiceRange, AppError> {
        self.check_range(p, None).await?;
        self.repo.create_invoice_range(p).await
    }

    pub async fn update_invoice_range(
        &self,
        id: i32,
        p: &InvoiceRangePayload,
    ) -> Result<InvoiceRange, AppError> {
        self.check_range(p, Some(id)).await?;
        self.repo.update_invoice_range(id, p).await
    }

    // Invariante: rangos da mesma série/local nunca se sobrepõem.
    async fn check_range(
        &self,
        p: &InvoiceRangePayload,
        exclude_id: Option<i32>,
    ) -> Result<(), AppError> {
        if p.range_start > p.range_end {
            return Err(AppError::UnprocessableEntity(
                "O início do rango deve ser menor ou igual ao fim.".into(),
            ));
        }

        let overlapping = self
            .repo
            .count_overlapping_ranges(p.local_id, &p.serie, p.range_start, p.range_end, exclude_id)
            .await?;

        if overlapping > 0 {
            return Err(AppError::Conflict(format!(
                "O rango {}-{} da série '{}' sobrepõe um rango existente.",
                p.range_start, p.range_end, p.serie
            )));
        }

        Ok(())
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    /// Cria a venda numa transação: calcula os totais no servidor, baixa o
    /// estoque, atribui o número de fatura do rango ativo e, em venda a
    /// crédito, abre o crédito correspondente.
    pub async fn create_sale(
        &self,
        user_id: i32,
        p: &CreateSalePayload,
    ) -> Result<SaleDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Resolve preços e totais linha a linha, travando os produtos.
        let mut lines: Vec<(i32, Decimal, Decimal, Decimal, Decimal)> = Vec::new();
        let mut subtotal = Decimal::ZERO;

        for item in &p.items {
            let (list_price, stock) = self
                .repo
                .find_product_for_update(&mut tx, item.product_id)
                .await?
                .ok_or(AppError::NotFound("Produto"))?;

            let unit_price = item.unit_price.unwrap_or(list_price);
            let line_total = resolve_line_total(item.quantity, unit_price, item.discount)
                .map_err(AppError::UnprocessableEntity)?;

            if Decimal::from(stock) < item.quantity {
                return Err(AppError::UnprocessableEntity(format!(
                    "Estoque insuficiente para o produto {}.",
                    item.product_id
                )));
            }

            subtotal += line_total;
            lines.push((item.product_id, item.quantity, unit_price, item.discount, line_total));
        }

        let total = subtotal - p.discount;
        if total < Decimal::ZERO {
            return Err(AppError::UnprocessableEntity(
                "O desconto não pode exceder o subtotal.".into(),
            ));
        }

        // 2. Número de fatura a partir do rango ativo do local, se houver.
        let (invoice_serie, invoice_number) =
            match self.repo.find_active_range_for_update(&mut tx, p.local_id).await? {
                Some(range) => {
                    if let Some(expires_on) = range.expires_on {
                        if expires_on < p.sale_date {
                            return Err(AppError::UnprocessableEntity(format!(
                                "O rango da série '{}' venceu em {}.",
                                range.serie, expires_on
                            )));
                        }
                    }
                    if range.current_number > range.range_end {
                        return Err(AppError::UnprocessableEntity(format!(
                            "O rango da série '{}' está esgotado.",
                            range.serie
                        )));
                    }
                    self.repo.advance_range_number(&mut tx, range.id).await?;
                    (Some(range.serie), Some(range.current_number))
                }
                None => (None, None),
            };

        // Venda à vista já nasce concluída; a crédito fica pendente até quitar.
        let status = match p.payment_kind {
            PaymentKind::Cash => SaleStatus::Completed,
            PaymentKind::Credit => SaleStatus::Pending,
        };

        let sale = self
            .repo
            .insert_sale(
                &mut tx,
                &NewSale {
                    client_id: p.client_id,
                    local_id: p.local_id,
                    user_id,
                    invoice_serie,
                    invoice_number,
                    sale_date: p.sale_date,
                    status,
                    payment_kind: p.payment_kind,
                    subtotal,
                    discount: p.discount,
                    total,
                },
            )
            .await?;

        // 3. Itens e baixa de estoque.
        let mut products = Vec::with_capacity(lines.len());
        for (product_id, quantity, unit_price, discount, line_total) in lines {
            let line = self
                .repo
                .insert_sale_product(&mut tx, sale.id, product_id, quantity, unit_price, discount, line_total)
                .await?;
            self.repo.decrement_stock(&mut tx, product_id, quantity).await?;
            products.push(line);
        }

        // 4. Venda a crédito abre o título.
        if p.payment_kind == PaymentKind::Credit {
            self.repo.insert_credit(&mut tx, sale.id, total, p.due_date).await?;
        }

        tx.commit().await?;

        Ok(SaleDetail { sale, products })
    }

    pub async fn sale_detail(&self, id: i32) -> Result<SaleDetail, AppError> {
        let sale = self.repo.find_sale(id).await?;
        let products = self.repo.list_sale_products(id).await?;
        Ok(SaleDetail { sale, products })
    }

    pub async fn update_sale_status(&self, id: i32, status: SaleStatus) -> Result<Sale, AppError> {
        self.repo.update_sale_status(id, status).await
    }

    // =========================================================================
    //  CRÉDITO E PAGAMENTOS
    // =========================================================================

    pub async fn credit_detail(&self, sale_id: i32) -> Result<SaleCreditDetail, AppError> {
        let credit = self.repo.find_credit_by_sale(sale_id).await?;
        let payments = self.repo.list_credit_payments(credit.id).await?;
        let balance = credit_balance(credit.total, &payments);
        Ok(SaleCreditDetail { credit, payments, balance })
    }

    /// Registra um pagamento de crédito. Invariante: a soma dos pagamentos
    /// nunca excede o total do crédito; ao atingir o total, o crédito quita.
    pub async fn register_payment(
        &self,
        sale_id: i32,
        p: &CreditPaymentPayload,
    ) -> Result<SaleCreditDetail, AppError> {
        if p.amount <= Decimal::ZERO {
            return Err(AppError::UnprocessableEntity(
                "O valor do pagamento deve ser maior que zero.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let credit = self.repo.find_credit_by_sale_for_update(&mut tx, sale_id).await?;
        let paid = self.repo.sum_credit_payments(&mut tx, credit.id).await?;
        let balance = credit.total - paid;

        if p.amount > balance {
            return Err(AppError::UnprocessableEntity(format!(
                "O pagamento de {} excede o saldo devedor de {}.",
                p.amount, balance
            )));
        }

        self.repo
            .insert_credit_payment(&mut tx, credit.id, p.amount, p.paid_on, p.note.as_deref())
            .await?;

        if p.amount == balance {
            self.repo.settle_credit(&mut tx, credit.id).await?;
            // A venda pendente também se conclui ao quitar.
            self.repo.complete_pending_sale(&mut tx, sale_id).await?;
        }

        tx.commit().await?;

        self.credit_detail(sale_id).await
    }
}
