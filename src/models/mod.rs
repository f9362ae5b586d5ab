//! Data models for the Expense Tracker API
//!
//! Wire types mirror the server's JSON (camelCase fields, decimal amounts);
//! request bodies are separate `*Input` structs.

pub mod budget;
pub mod category;
pub mod page;
pub mod summary;
pub mod transaction;
pub mod user;

// Re-export commonly used types for convenience
pub use budget::{AlertSeverity, Budget, BudgetAlert, BudgetInput, BudgetStatus};
pub use category::{Category, CategoryInput};
pub use page::{PageEnvelope, Pagination};
pub use summary::{CategorySpending, MonthlySummary, YearlySummary};
pub use transaction::{FilterUpdate, Transaction, TransactionFilters, TransactionInput, TransactionType};
pub use user::{ApiUser, CurrentUser};
