//! REST transport for the Expense Tracker API

pub mod budgets;
pub mod categories;
pub mod client;
pub mod error;
pub mod interceptor;
pub mod transactions;
pub mod users;

pub use client::ApiClient;
pub use error::ApiError;
pub use interceptor::{AuthInterceptor, Interceptor, UnauthorizedInterceptor};
pub use transactions::{ListQuery, SortDirection};
