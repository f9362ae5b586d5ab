//! Observable client-side state backed by the API
//!
//! Each store owns its state behind a `watch` channel: actions mutate it in
//! place and every subscriber is woken.

pub mod budgets;
pub mod categories;
pub mod transactions;
pub mod user;

pub use budgets::{BudgetsState, BudgetsStore};
pub use categories::{CategoriesState, CategoriesStore};
pub use transactions::{TransactionsState, TransactionsStore};
pub use user::Session;
