//! Expense Tracker client
//!
//! Client-side state and REST transport for the Expense Tracker API: a route
//! table with page titles, an HTTP client with an interceptor chain (bearer
//! token, 401 handling, error normalization), a user session, and stores that
//! cache transactions, categories and budgets.

pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod notify;
pub mod router;
pub mod storage;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use app::App;
pub use config::{ClientConfig, ConfigError};
pub use router::Router;
pub use stores::{BudgetsStore, CategoriesStore, Session, TransactionsStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
