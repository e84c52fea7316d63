pub mod access;
pub mod auth;
pub mod cash;
pub mod catalog;
pub mod documents;
pub mod parties;
pub mod purchases;
pub mod rentals;
pub mod sales;
pub mod tournaments;
