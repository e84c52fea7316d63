pub mod access_repo;
pub use access_repo::AccessRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod parties_repo;
pub use parties_repo::PartiesRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod purchases_repo;
pub use purchases_repo::PurchasesRepository;
pub mod cash_repo;
pub use cash_repo::CashRepository;
pub mod rentals_repo;
pub use rentals_repo::RentalsRepository;
pub mod tournaments_repo;
pub use tournaments_repo::TournamentsRepository;
