use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        AccessRepository, CashRepository, CatalogRepository, PartiesRepository,
        PurchasesRepository, RentalsRepository, SalesRepository, TournamentsRepository,
        UserRepository,
    },
    services::{AccessService, AuthService, CashService, DocumentService, SalesService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub access_service: AccessService,
    pub sales_service: SalesService,
    pub cash_service: CashService,
    pub document_service: DocumentService,

    pub user_repo: UserRepository,
    pub access_repo: AccessRepository,
    pub catalog_repo: CatalogRepository,
    pub parties_repo: PartiesRepository,
    pub sales_repo: SalesRepository,
    pub purchases_repo: PurchasesRepository,
    pub cash_repo: CashRepository,
    pub rentals_repo: RentalsRepository,
    pub tournaments_repo: TournamentsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let access_repo = AccessRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let parties_repo = PartiesRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());
        let purchases_repo = PurchasesRepository::new(db_pool.clone());
        let cash_repo = CashRepository::new(db_pool.clone());
        let rentals_repo = RentalsRepository::new(db_pool.clone());
        let tournaments_repo = TournamentsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let access_service = AccessService::new(access_repo.clone());
        let sales_service = SalesService::new(sales_repo.clone(), db_pool.clone());
        let cash_service = CashService::new(cash_repo.clone());
        let document_service =
            DocumentService::new(sales_repo.clone(), db_pool.clone(), fonts_dir);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            access_service,
            sales_service,
            cash_service,
            document_service,
            user_repo,
            access_repo,
            catalog_repo,
            parties_repo,
            sales_repo,
            purchases_repo,
            cash_repo,
            rentals_repo,
            tournaments_repo,
        })
    }
}
