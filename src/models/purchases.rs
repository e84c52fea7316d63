use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "purchase_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    pub supplier_id: i32,
    pub warehouse_id: i32,
    pub invoice_number: Option<String>,
    pub purchase_date: NaiveDate,
    pub status: PurchaseStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i32,
    pub supplier_id: i32,
    pub warehouse_id: i32,
    pub user_id: i32,
    pub invoice_number: Option<String>,
    pub purchase_date: NaiveDate,
    pub status: PurchaseStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}
