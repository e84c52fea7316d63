use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas
    let auth_routes = Router::new().route("/api/auth/login", post(handlers::auth::login));

    // Acesso: usuários, perfis, menus e matriz de permissões
    let access_routes = Router::new()
        .route("/api/users/me", get(handlers::auth::get_me))
        .route(
            "/api/users",
            get(handlers::access::list_users).post(handlers::access::create_user),
        )
        .route(
            "/api/users/{id}",
            put(handlers::access::update_user).delete(handlers::access::delete_user),
        )
        .route(
            "/api/profiles",
            get(handlers::access::list_profiles).post(handlers::access::create_profile),
        )
        .route(
            "/api/profiles/{id}",
            put(handlers::access::update_profile).delete(handlers::access::delete_profile),
        )
        .route(
            "/api/menus",
            get(handlers::access::list_menus).post(handlers::access::create_menu),
        )
        .route(
            "/api/menus/{id}",
            put(handlers::access::update_menu).delete(handlers::access::delete_menu),
        )
        .route("/api/access/me/menus", get(handlers::access::my_menus))
        .route(
            "/api/access/permissions",
            get(handlers::access::list_permissions).post(handlers::access::grant_permission),
        )
        .route(
            "/api/access/permissions/{id}",
            delete(handlers::access::revoke_permission),
        );

    let catalog_routes = Router::new()
        .route(
            "/api/locals",
            get(handlers::catalog::list_locals).post(handlers::catalog::create_local),
        )
        .route(
            "/api/locals/{id}",
            put(handlers::catalog::update_local).delete(handlers::catalog::delete_local),
        )
        .route(
            "/api/warehouses",
            get(handlers::catalog::list_warehouses).post(handlers::catalog::create_warehouse),
        )
        .route(
            "/api/warehouses/{id}",
            put(handlers::catalog::update_warehouse).delete(handlers::catalog::delete_warehouse),
        )
        .route(
            "/api/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/api/products/{id}",
            put(handlers::catalog::update_product).delete(handlers::catalog::delete_product),
        )
        .route(
            "/api/combos",
            get(handlers::catalog::list_combos).post(handlers::catalog::create_combo),
        )
        .route(
            "/api/combos/{id}",
            put(handlers::catalog::update_combo).delete(handlers::catalog::delete_combo),
        )
        .route(
            "/api/transports",
            get(handlers::catalog::list_transports).post(handlers::catalog::create_transport),
        )
        .route(
            "/api/transports/{id}",
            put(handlers::catalog::update_transport).delete(handlers::catalog::delete_transport),
        )
        .route(
            "/api/currencies",
            get(handlers::catalog::list_currencies).post(handlers::catalog::create_currency),
        )
        .route(
            "/api/currencies/{id}",
            put(handlers::catalog::update_currency).delete(handlers::catalog::delete_currency),
        );

    let parties_routes = Router::new()
        .route(
            "/api/clients",
            get(handlers::parties::list_clients).post(handlers::parties::create_client),
        )
        .route(
            "/api/clients/{id}",
            put(handlers::parties::update_client).delete(handlers::parties::delete_client),
        )
        .route(
            "/api/suppliers",
            get(handlers::parties::list_suppliers).post(handlers::parties::create_supplier),
        )
        .route(
            "/api/suppliers/{id}",
            put(handlers::parties::update_supplier).delete(handlers::parties::delete_supplier),
        )
        .route(
            "/api/schools",
            get(handlers::parties::list_schools).post(handlers::parties::create_school),
        )
        .route(
            "/api/schools/{id}",
            put(handlers::parties::update_school).delete(handlers::parties::delete_school),
        );

    let sales_routes = Router::new()
        .route(
            "/api/invoice-ranges",
            get(handlers::sales::list_invoice_ranges).post(handlers::sales::create_invoice_range),
        )
        .route(
            "/api/invoice-ranges/{id}",
            put(handlers::sales::update_invoice_range)
                .delete(handlers::sales::delete_invoice_range),
        )
        .route(
            "/api/sales",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route(
            "/api/sales/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route("/api/sales/{id}/credit", get(handlers::sales::get_sale_credit))
        .route(
            "/api/sales/{id}/payments",
            post(handlers::sales::register_credit_payment),
        )
        .route(
            "/api/sales/{id}/pdf",
            get(handlers::documents::generate_sale_pdf),
        );

    let purchases_routes = Router::new()
        .route(
            "/api/purchases",
            get(handlers::purchases::list_purchases).post(handlers::purchases::create_purchase),
        )
        .route(
            "/api/purchases/{id}",
            put(handlers::purchases::update_purchase)
                .delete(handlers::purchases::delete_purchase),
        );

    let cash_routes = Router::new()
        .route(
            "/api/cash-registers",
            get(handlers::cash::list_registers).post(handlers::cash::create_register),
        )
        .route(
            "/api/cash-registers/{id}",
            put(handlers::cash::update_register).delete(handlers::cash::delete_register),
        )
        .route(
            "/api/cash-registers/{id}/logs",
            get(handlers::cash::list_register_logs),
        )
        .route("/api/cash-registers/{id}/open", post(handlers::cash::open_register))
        .route("/api/cash-registers/{id}/close", post(handlers::cash::close_register))
        .route(
            "/api/expense-types",
            get(handlers::cash::list_expense_types).post(handlers::cash::create_expense_type),
        )
        .route(
            "/api/expense-types/{id}",
            put(handlers::cash::update_expense_type)
                .delete(handlers::cash::delete_expense_type),
        );

    let rentals_routes = Router::new()
        .route(
            "/api/courts",
            get(handlers::rentals::list_courts).post(handlers::rentals::create_court),
        )
        .route(
            "/api/courts/{id}",
            put(handlers::rentals::update_court).delete(handlers::rentals::delete_court),
        )
        .route(
            "/api/rentals",
            get(handlers::rentals::list_rentals).post(handlers::rentals::create_rental),
        )
        .route(
            "/api/rentals/{id}",
            put(handlers::rentals::update_rental).delete(handlers::rentals::delete_rental),
        )
        .route(
            "/api/plans",
            get(handlers::rentals::list_plans).post(handlers::rentals::create_plan),
        )
        .route(
            "/api/plans/{id}",
            put(handlers::rentals::update_plan).delete(handlers::rentals::delete_plan),
        )
        .route(
            "/api/subscriptions",
            get(handlers::rentals::list_subscriptions)
                .post(handlers::rentals::create_subscription),
        )
        .route(
            "/api/subscriptions/{id}",
            put(handlers::rentals::update_subscription)
                .delete(handlers::rentals::delete_subscription),
        );

    let tournaments_routes = Router::new()
        .route(
            "/api/competitions",
            get(handlers::tournaments::list_competitions)
                .post(handlers::tournaments::create_competition),
        )
        .route(
            "/api/competitions/{id}",
            put(handlers::tournaments::update_competition)
                .delete(handlers::tournaments::delete_competition),
        )
        .route(
            "/api/tournaments",
            get(handlers::tournaments::list_tournaments)
                .post(handlers::tournaments::create_tournament),
        )
        .route(
            "/api/tournaments/{id}",
            put(handlers::tournaments::update_tournament)
                .delete(handlers::tournaments::delete_tournament),
        )
        .route(
            "/api/rankings",
            get(handlers::tournaments::list_rankings).post(handlers::tournaments::create_ranking),
        )
        .route(
            "/api/rankings/{id}",
            put(handlers::tournaments::update_ranking)
                .delete(handlers::tournaments::delete_ranking),
        );

    // Tudo que passa pelo guardião de autenticação.
    let protected_routes = access_routes
        .merge(catalog_routes)
        .merge(parties_routes)
        .merge(sales_routes)
        .merge(purchases_routes)
        .merge(cash_routes)
        .merge(rentals_routes)
        .merge(tournaments_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
