use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Acesso ---
        handlers::access::list_users,
        handlers::access::create_user,
        handlers::access::update_user,
        handlers::access::delete_user,
        handlers::access::list_profiles,
        handlers::access::create_profile,
        handlers::access::update_profile,
        handlers::access::delete_profile,
        handlers::access::list_menus,
        handlers::access::create_menu,
        handlers::access::update_menu,
        handlers::access::delete_menu,
        handlers::access::my_menus,
        handlers::access::list_permissions,
        handlers::access::grant_permission,
        handlers::access::revoke_permission,

        // --- Catálogo ---
        handlers::catalog::list_locals,
        handlers::catalog::create_local,
        handlers::catalog::update_local,
        handlers::catalog::delete_local,
        handlers::catalog::list_warehouses,
        handlers::catalog::create_warehouse,
        handlers::catalog::update_warehouse,
        handlers::catalog::delete_warehouse,
        handlers::catalog::list_products,
        handlers::catalog::create_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::catalog::list_combos,
        handlers::catalog::create_combo,
        handlers::catalog::update_combo,
        handlers::catalog::delete_combo,
        handlers::catalog::list_transports,
        handlers::catalog::create_transport,
        handlers::catalog::update_transport,
        handlers::catalog::delete_transport,
        handlers::catalog::list_currencies,
        handlers::catalog::create_currency,
        handlers::catalog::update_currency,
        handlers::catalog::delete_currency,

        // --- Pessoas ---
        handlers::parties::list_clients,
        handlers::parties::create_client,
        handlers::parties::update_client,
        handlers::parties::delete_client,
        handlers::parties::list_suppliers,
        handlers::parties::create_supplier,
        handlers::parties::update_supplier,
        handlers::parties::delete_supplier,
        handlers::parties::list_schools,
        handlers::parties::create_school,
        handlers::parties::update_school,
        handlers::parties::delete_school,

        // --- Vendas ---
        handlers::sales::list_invoice_ranges,
        handlers::sales::create_invoice_range,
        handlers::sales::update_invoice_range,
        handlers::sales::delete_invoice_range,
        handlers::sales::list_sales,
        handlers::sales::create_sale,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::sales::get_sale_credit,
        handlers::sales::register_credit_payment,
        handlers::documents::generate_sale_pdf,

        // --- Compras ---
        handlers::purchases::list_purchases,
        handlers::purchases::create_purchase,
        handlers::purchases::update_purchase,
        handlers::purchases::delete_purchase,

        // --- Caixa ---
        handlers::cash::list_registers,
        handlers::cash::create_register,
        handlers::cash::update_register,
        handlers::cash::delete_register,
        handlers::cash::list_register_logs,
        handlers::cash::open_register,
        handlers::cash::close_register,
        handlers::cash::list_expense_types,
        handlers::cash::create_expense_type,
        handlers::cash::update_expense_type,
        handlers::cash::delete_expense_type,

        // --- Locações ---
        handlers::rentals::list_courts,
        handlers::rentals::create_court,
        handlers::rentals::update_court,
        handlers::rentals::delete_court,
        handlers::rentals::list_rentals,
        handlers::rentals::create_rental,
        handlers::rentals::update_rental,
        handlers::rentals::delete_rental,
        handlers::rentals::list_plans,
        handlers::rentals::create_plan,
        handlers::rentals::update_plan,
        handlers::rentals::delete_plan,
        handlers::rentals::list_subscriptions,
        handlers::rentals::create_subscription,
        handlers::rentals::update_subscription,
        handlers::rentals::delete_subscription,

        // --- Torneios ---
        handlers::tournaments::list_competitions,
        handlers::tournaments::create_competition,
        handlers::tournaments::update_competition,
        handlers::tournaments::delete_competition,
        handlers::tournaments::list_tournaments,
        handlers::tournaments::create_tournament,
        handlers::tournaments::update_tournament,
        handlers::tournaments::delete_tournament,
        handlers::tournaments::list_rankings,
        handlers::tournaments::create_ranking,
        handlers::tournaments::update_ranking,
        handlers::tournaments::delete_ranking,
    ),
    components(
        schemas(
            // --- Auth / Acesso ---
            models::auth::User,
            models::auth::AuthResponse,
            models::auth::LoginPayload,
            models::auth::UserPayload,
            models::access::MenuAction,
            models::access::Profile,
            models::access::Menu,
            models::access::ProfileMenuAction,
            models::access::ProfilePayload,
            models::access::MenuPayload,
            models::access::GrantPayload,

            // --- Catálogo ---
            models::catalog::Local,
            models::catalog::Warehouse,
            models::catalog::Product,
            models::catalog::Combo,
            models::catalog::Transport,
            models::catalog::Currency,
            models::catalog::LocalPayload,
            models::catalog::WarehousePayload,
            models::catalog::ProductPayload,
            models::catalog::ComboPayload,
            models::catalog::TransportPayload,
            models::catalog::CurrencyPayload,

            // --- Pessoas ---
            models::parties::Client,
            models::parties::Supplier,
            models::parties::School,
            models::parties::ClientPayload,
            models::parties::SupplierPayload,
            models::parties::SchoolPayload,

            // --- Vendas ---
            models::sales::SaleStatus,
            models::sales::PaymentKind,
            models::sales::CreditStatus,
            models::sales::Sale,
            models::sales::SaleProduct,
            models::sales::SaleDetail,
            models::sales::SaleCredit,
            models::sales::SaleCreditPayment,
            models::sales::SaleCreditDetail,
            models::sales::InvoiceRange,
            models::sales::SaleItemPayload,
            models::sales::CreateSalePayload,
            models::sales::UpdateSalePayload,
            models::sales::CreditPaymentPayload,
            models::sales::InvoiceRangePayload,

            // --- Compras ---
            models::purchases::PurchaseStatus,
            models::purchases::Purchase,
            models::purchases::PurchasePayload,

            // --- Caixa ---
            models::cash::RegisterLogStatus,
            models::cash::CashRegister,
            models::cash::CashRegisterLog,
            models::cash::ExpenseType,
            models::cash::CashRegisterPayload,
            models::cash::OpenLogPayload,
            models::cash::CloseLogPayload,
            models::cash::ExpenseTypePayload,

            // --- Locações ---
            models::rentals::RentalStatus,
            models::rentals::SubscriptionStatus,
            models::rentals::Court,
            models::rentals::Rental,
            models::rentals::Plan,
            models::rentals::Subscription,
            models::rentals::CourtPayload,
            models::rentals::RentalPayload,
            models::rentals::PlanPayload,
            models::rentals::SubscriptionPayload,

            // --- Torneios ---
            models::tournaments::TournamentStatus,
            models::tournaments::Competition,
            models::tournaments::Tournament,
            models::tournaments::Ranking,
            models::tournaments::CompetitionPayload,
            models::tournaments::TournamentPayload,
            models::tournaments::RankingPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Acesso", description = "Usuários, perfis, menus e matriz de permissões"),
        (name = "Catálogo", description = "Locais, armazéns, produtos, combos, transportes e moedas"),
        (name = "Pessoas", description = "Clientes, fornecedores e escolas"),
        (name = "Vendas", description = "Vendas, rangos de factura, crédito e comprovantes"),
        (name = "Compras", description = "Compras a fornecedores"),
        (name = "Caixa", description = "Caixas, aberturas/fechamentos e tipos de despesa"),
        (name = "Locações", description = "Quadras, locações, planos e assinaturas"),
        (name = "Torneios", description = "Competências, torneios e rankings")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
