use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payment_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Cash,
    Credit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "credit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    Open,
    Settled,
}

// --- REGISTROS ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
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
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleProduct {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
}

// Cabeçalho + itens, o que o frontend mostra na tela de detalhe.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: Sale,
    pub products: Vec<SaleProduct>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleCredit {
    pub id: i32,
    pub sale_id: i32,
    pub total: Decimal,
    pub due_date: Option<NaiveDate>,
    pub status: CreditStatus,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreditPayment {
    pub id: i32,
    pub sale_credit_id: i32,
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
}

// Crédito com o saldo já computado (total - soma dos pagamentos).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreditDetail {
    pub credit: SaleCredit,
    pub payments: Vec<SaleCreditPayment>,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRange {
    pub id: i32,
    pub local_id: i32,
    pub serie: String,
    pub range_start: i64,
    pub range_end: i64,
    pub current_number: i64,
    pub authorization_code: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub is_active: bool,
}

// --- PAYLOADS ---

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub product_id: i32,
    pub quantity: Decimal,
    // Se omitido, usa o preço de tabela do produto.
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub discount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub client_id: i32,
    pub local_id: i32,
    pub sale_date: NaiveDate,
    pub payment_kind: PaymentKind,
    #[serde(default)]
    pub discount: Decimal,
    // Vencimento do crédito, só faz sentido com payment_kind = credit.
    pub due_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "A venda precisa de ao menos um item."))]
    pub items: Vec<SaleItemPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    pub status: SaleStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditPaymentPayload {
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRangePayload {
    pub local_id: i32,
    #[validate(length(min = 1, message = "required"))]
    pub serie: String,
    pub range_start: i64,
    pub range_end: i64,
    pub authorization_code: Option<String>,
    pub expires_on: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Saldo devedor de um crédito.
pub fn credit_balance(total: Decimal, payments: &[SaleCreditPayment]) -> Decimal {
    let paid: Decimal = payments.iter().map(|p| p.amount).sum();
    total - paid
}

/// Total de uma linha de venda (quantidade * preço - desconto), rejeitando
/// valores monetários inválidos antes de qualquer escrita no banco.
pub fn resolve_line_total(
    quantity: Decimal,
    unit_price: Decimal,
    discount: Decimal,
) -> Result<Decimal, String> {
    if quantity <= Decimal::ZERO {
        return Err("A quantidade deve ser maior que zero.".into());
    }
    if unit_price < Decimal::ZERO {
        return Err("O preço unitário não pode ser negativo.".into());
    }
    if discount < Decimal::ZERO {
        return Err("O desconto não pode ser negativo.".into());
    }

    let total = quantity * unit_price - discount;
    if total < Decimal::ZERO {
        return Err("O desconto não pode exceder o valor da linha.".into());
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn payment(amount: Decimal) -> SaleCreditPayment {
        SaleCreditPayment {
            id: 1,
            sale_credit_id: 1,
            amount,
            paid_on: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            note: None,
        }
    }

    #[test]
    fn saldo_e_total_menos_pagamentos() {
        let payments = vec![payment(dec(3000)), payment(dec(2050))];
        assert_eq!(credit_balance(dec(10000), &payments), dec(4950));
        assert_eq!(credit_balance(dec(10000), &[]), dec(10000));
    }

    #[test]
    fn total_da_linha_com_desconto() {
        let total = resolve_line_total(Decimal::from(3), dec(2500), dec(500));
        assert_eq!(total, Ok(dec(7000)));
    }

    #[test]
    fn linha_rejeita_valores_monetarios_invalidos() {
        // Quantidade zero ou negativa.
        assert!(resolve_line_total(Decimal::ZERO, dec(2500), Decimal::ZERO).is_err());
        assert!(resolve_line_total(Decimal::from(-1), dec(2500), Decimal::ZERO).is_err());
        // Preço unitário negativo.
        assert!(resolve_line_total(Decimal::from(1), dec(-100), Decimal::ZERO).is_err());
        // Desconto negativo (aumentaria o total da linha).
        assert!(resolve_line_total(Decimal::from(1), dec(2500), dec(-500)).is_err());
        // Desconto maior que o valor da linha.
        assert!(resolve_line_total(Decimal::from(1), dec(2500), dec(2501)).is_err());
        // Desconto igual ao valor da linha zera, não rejeita.
        assert_eq!(
            resolve_line_total(Decimal::from(1), dec(2500), dec(2500)),
            Ok(Decimal::ZERO)
        );
    }

    #[test]
    fn status_serializa_minusculo() {
        assert_eq!(
            serde_json::to_string(&SaleStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentKind>("\"credit\"").unwrap(),
            PaymentKind::Credit
        );
    }
}
