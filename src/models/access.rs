use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Mapeia o CREATE TYPE menu_action do banco.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "menu_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    View,
    Create,
    Edit,
    Delete,
    Export,
}

impl MenuAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::View => "view",
            MenuAction::Create => "create",
            MenuAction::Edit => "edit",
            MenuAction::Delete => "delete",
            MenuAction::Export => "export",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i32,
    pub key: String,
    pub name: String,
    pub position: i32,
}

// Uma linha da matriz de permissões (perfil, menu, ação).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMenuAction {
    pub id: i32,
    pub profile_id: i32,
    pub menu_id: i32,
    pub action: MenuAction,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    #[validate(length(min = 1, message = "required"))]
    pub key: String,
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

// Concede uma célula da matriz.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantPayload {
    pub profile_id: i32,
    pub menu_id: i32,
    pub action: MenuAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_action_serializa_minusculo() {
        assert_eq!(serde_json::to_string(&MenuAction::View).unwrap(), "\"view\"");
        assert_eq!(
            serde_json::from_str::<MenuAction>("\"export\"").unwrap(),
            MenuAction::Export
        );
    }
}
