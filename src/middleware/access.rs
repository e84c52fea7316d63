use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{access::MenuAction, auth::User},
};

/// 1. O trait que define uma regra de acesso: qual menu e qual ação.
pub trait AccessRule: Send + Sync + 'static {
    fn menu() -> &'static str;
    fn action() -> MenuAction;

    fn slug() -> String {
        format!("{}:{}", Self::menu(), Self::action().as_str())
    }
}

/// 2. O extrator (guardião). Handlers que exigem uma permissão declaram
/// `_perm: RequireAccess<SalesCreate>` na assinatura e recebem 403 caso
/// o perfil do usuário não tenha a célula (menu, ação) concedida.
pub struct RequireAccess<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireAccess<T>
where
    T: AccessRule,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Usuário autenticado (colocado nos extensions pelo auth_guard).
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)?;

        // B. Uma consulta na matriz (perfil, menu, ação). Sem cache.
        let granted = app_state
            .access_service
            .has_access(user.0.profile_id, T::menu(), T::action())
            .await?;

        if !granted {
            return Err(AppError::PermissionDenied(T::slug()));
        }

        Ok(RequireAccess(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS REGRAS (TIPOS)
// ---

macro_rules! access_rule {
    ($name:ident, $menu:literal, $action:ident) => {
        pub struct $name;
        impl AccessRule for $name {
            fn menu() -> &'static str {
                $menu
            }
            fn action() -> MenuAction {
                MenuAction::$action
            }
        }
    };
}

access_rule!(UsersView, "users", View);
access_rule!(UsersCreate, "users", Create);
access_rule!(UsersEdit, "users", Edit);
access_rule!(UsersDelete, "users", Delete);

access_rule!(ProfilesView, "profiles", View);
access_rule!(ProfilesCreate, "profiles", Create);
access_rule!(ProfilesEdit, "profiles", Edit);
access_rule!(ProfilesDelete, "profiles", Delete);

access_rule!(MenusView, "menus", View);
access_rule!(MenusCreate, "menus", Create);
access_rule!(MenusEdit, "menus", Edit);
access_rule!(MenusDelete, "menus", Delete);

access_rule!(LocalsView, "locals", View);
access_rule!(LocalsCreate, "locals", Create);
access_rule!(LocalsEdit, "locals", Edit);
access_rule!(LocalsDelete, "locals", Delete);

access_rule!(WarehousesView, "warehouses", View);
access_rule!(WarehousesCreate, "warehouses", Create);
access_rule!(WarehousesEdit, "warehouses", Edit);
access_rule!(WarehousesDelete, "warehouses", Delete);

access_rule!(ProductsView, "products", View);
access_rule!(ProductsCreate, "products", Create);
access_rule!(ProductsEdit, "products", Edit);
access_rule!(ProductsDelete, "products", Delete);

access_rule!(CombosView, "combos", View);
access_rule!(CombosCreate, "combos", Create);
access_rule!(CombosEdit, "combos", Edit);
access_rule!(CombosDelete, "combos", Delete);

access_rule!(TransportsView, "transports", View);
access_rule!(TransportsCreate, "transports", Create);
access_rule!(TransportsEdit, "transports", Edit);
access_rule!(TransportsDelete, "transports", Delete);

access_rule!(CurrenciesView, "currencies", View);
access_rule!(CurrenciesCreate, "currencies", Create);
access_rule!(CurrenciesEdit, "currencies", Edit);
access_rule!(CurrenciesDelete, "currencies", Delete);

access_rule!(ClientsView, "clients", View);
access_rule!(ClientsCreate, "clients", Create);
access_rule!(ClientsEdit, "clients", Edit);
access_rule!(ClientsDelete, "clients", Delete);

access_rule!(SuppliersView, "suppliers", View);
access_rule!(SuppliersCreate, "suppliers", Create);
access_rule!(SuppliersEdit, "suppliers", Edit);
access_rule!(SuppliersDelete, "suppliers", Delete);

access_rule!(SchoolsView, "schools", View);
access_rule!(SchoolsCreate, "schools", Create);
access_rule!(SchoolsEdit, "schools", Edit);
access_rule!(SchoolsDelete, "schools", Delete);

access_rule!(InvoiceRangesView, "invoice_ranges", View);
access_rule!(InvoiceRangesCreate, "invoice_ranges", Create);
access_rule!(InvoiceRangesEdit, "invoice_ranges", Edit);
access_rule!(InvoiceRangesDelete, "invoice_ranges", Delete);

access_rule!(SalesView, "sales", View);
access_rule!(SalesCreate, "sales", Create);
access_rule!(SalesEdit, "sales", Edit);
access_rule!(SalesDelete, "sales", Delete);
access_rule!(SalesExport, "sales", Export);

access_rule!(PurchasesView, "purchases", View);
access_rule!(PurchasesCreate, "purchases", Create);
access_rule!(PurchasesEdit, "purchases", Edit);
access_rule!(PurchasesDelete, "purchases", Delete);

access_rule!(CashRegistersView, "cash_registers", View);
access_rule!(CashRegistersCreate, "cash_registers", Create);
access_rule!(CashRegistersEdit, "cash_registers", Edit);
access_rule!(CashRegistersDelete, "cash_registers", Delete);

access_rule!(ExpenseTypesView, "expense_types", View);
access_rule!(ExpenseTypesCreate, "expense_types", Create);
access_rule!(ExpenseTypesEdit, "expense_types", Edit);
access_rule!(ExpenseTypesDelete, "expense_types", Delete);

access_rule!(CourtsView, "courts", View);
access_rule!(CourtsCreate, "courts", Create);
access_rule!(CourtsEdit, "courts", Edit);
access_rule!(CourtsDelete, "courts", Delete);

access_rule!(RentalsView, "rentals", View);
access_rule!(RentalsCreate, "rentals", Create);
access_rule!(RentalsEdit, "rentals", Edit);
access_rule!(RentalsDelete, "rentals", Delete);

access_rule!(PlansView, "plans", View);
access_rule!(PlansCreate, "plans", Create);
access_rule!(PlansEdit, "plans", Edit);
access_rule!(PlansDelete, "plans", Delete);

access_rule!(SubscriptionsView, "subscriptions", View);
access_rule!(SubscriptionsCreate, "subscriptions", Create);
access_rule!(SubscriptionsEdit, "subscriptions", Edit);
access_rule!(SubscriptionsDelete, "subscriptions", Delete);

access_rule!(CompetitionsView, "competitions", View);
access_rule!(CompetitionsCreate, "competitions", Create);
access_rule!(CompetitionsEdit, "competitions", Edit);
access_rule!(CompetitionsDelete, "competitions", Delete);

access_rule!(TournamentsView, "tournaments", View);
access_rule!(TournamentsCreate, "tournaments", Create);
access_rule!(TournamentsEdit, "tournaments", Edit);
access_rule!(TournamentsDelete, "tournaments", Delete);

access_rule!(RankingsView, "rankings", View);
access_rule!(RankingsCreate, "rankings", Create);
access_rule!(RankingsEdit, "rankings", Edit);
access_rule!(RankingsDelete, "rankings", Delete);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_junta_menu_e_acao() {
        assert_eq!(SalesCreate::slug(), "sales:create");
        assert_eq!(SalesExport::slug(), "sales:export");
        assert_eq!(CourtsDelete::slug(), "courts:delete");
    }
}
