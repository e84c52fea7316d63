pub mod access_service;
pub use access_service::AccessService;
pub mod auth;
pub use auth::AuthService;
pub mod cash_service;
pub use cash_service::CashService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod sales_service;
pub use sales_service::SalesService;
