use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "register_log_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegisterLogStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    pub id: i32,
    pub local_id: i32,
    pub name: String,
    pub is_active: bool,
}

// Um dia de operação de uma caixa: abertura, fechamento e valores contados.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterLog {
    pub id: i32,
    pub cash_register_id: i32,
    pub log_date: NaiveDate,
    pub opening_amount: Decimal,
    pub closing_amount: Option<Decimal>,
    pub opened_by: i32,
    pub closed_by: Option<i32>,
    pub status: RegisterLogStatus,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterPayload {
    pub local_id: i32,
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenLogPayload {
    pub opening_amount: Decimal,
    // Se omitida, usa a data de hoje.
    pub log_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseLogPayload {
    pub closing_amount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTypePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Valida o valor contado na abertura ou no fechamento de caixa.
pub fn check_counted_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err("O valor contado não pode ser negativo.".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valor_contado_negativo_e_rejeitado() {
        assert!(check_counted_amount(Decimal::new(-1, 2)).is_err());
        assert!(check_counted_amount(Decimal::ZERO).is_ok());
        assert!(check_counted_amount(Decimal::new(15000, 2)).is_ok());
    }
}
