//! Client-side cache of one page of transactions
//!
//! Mirrors server responses into observable state. Local list edits only ever
//! follow a confirmed server write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::api::{ApiClient, ApiError, ListQuery};
use crate::models::transaction::total_of;
use crate::models::{FilterUpdate, Pagination, Transaction, TransactionFilters, TransactionInput, TransactionType};
use crate::notify::Notifier;

#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub filters: TransactionFilters,
}

impl TransactionsState {
    fn new(page_size: u32) -> Self {
        Self {
            transactions: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::new(page_size),
            filters: TransactionFilters::default(),
        }
    }

    /// Sum of EXPENSE amounts on the loaded page only
    pub fn total_expenses(&self) -> Decimal {
        total_of(&self.transactions, TransactionType::Expense)
    }

    /// Sum of INCOME amounts on the loaded page only
    pub fn total_income(&self) -> Decimal {
        total_of(&self.transactions, TransactionType::Income)
    }
}

pub struct TransactionsStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<TransactionsState>,
    page_size: u32,
    /// Ticket of the newest fetch; responses carrying an older ticket are dropped
    fetch_seq: AtomicU64,
}

impl TransactionsStore {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_page_size(api, notifier, Self::DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        let (state, _) = watch::channel(TransactionsState::new(page_size));
        Self {
            api,
            notifier,
            state,
            page_size,
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Receiver that is woken after every state change
    pub fn subscribe(&self) -> watch::Receiver<TransactionsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TransactionsState {
        self.state.borrow().clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.borrow().pagination
    }

    pub fn filters(&self) -> TransactionFilters {
        self.state.borrow().filters.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn total_expenses(&self) -> Decimal {
        self.state.borrow().total_expenses()
    }

    pub fn total_income(&self) -> Decimal {
        self.state.borrow().total_income()
    }

    /// Load one page, newest first, with the active filters
    ///
    /// Failures are recorded in `error` and surfaced as a toast; the previously
    /// loaded page stays in place.
    pub async fn fetch(&self, user_id: i64, page: u32) {
        let ticket = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        let query = ListQuery::newest_first(page, self.page_size, self.filters());

        let result = self.api.list_transactions(user_id, &query).await;

        if self.fetch_seq.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale transactions response for page {}", page);
            return;
        }

        match result {
            Ok(envelope) => {
                debug!(
                    "Loaded {} transactions (page {} of {})",
                    envelope.content.len(),
                    envelope.number + 1,
                    envelope.total_pages
                );
                self.state.send_modify(|s| {
                    s.pagination = Pagination::from_envelope(&envelope);
                    s.transactions = envelope.content;
                    s.loading = false;
                });
            }
            Err(e) => {
                error!("Failed to load transactions for user {}: {}", user_id, e.detail());
                self.state.send_modify(|s| {
                    s.error = Some(e.message());
                    s.loading = false;
                });
                self.notifier.error("Failed to load transactions");
            }
        }
    }

    /// Create on the server, then put the returned record at the top of the list
    pub async fn create(&self, user_id: i64, input: &TransactionInput) -> Result<Transaction, ApiError> {
        match self.api.create_transaction(user_id, input).await {
            Ok(created) => {
                info!("Created transaction {} for user {}", created.id, user_id);
                let record = created.clone();
                self.state.send_modify(|s| {
                    s.transactions.retain(|t| t.id != record.id);
                    s.transactions.insert(0, record);
                });
                self.notifier.success("Transaction added successfully");
                Ok(created)
            }
            Err(e) => {
                error!("Failed to create transaction: {}", e.detail());
                self.notifier.error("Failed to create transaction");
                Err(e)
            }
        }
    }

    /// Update on the server, then replace the matching record in place if it is loaded
    pub async fn update(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: &TransactionInput,
    ) -> Result<Transaction, ApiError> {
        match self.api.update_transaction(user_id, transaction_id, input).await {
            Ok(updated) => {
                info!("Updated transaction {}", transaction_id);
                let record = updated.clone();
                self.state.send_modify(|s| {
                    if let Some(slot) = s.transactions.iter_mut().find(|t| t.id == transaction_id) {
                        *slot = record;
                    }
                });
                self.notifier.success("Transaction updated successfully");
                Ok(updated)
            }
            Err(e) => {
                error!("Failed to update transaction {}: {}", transaction_id, e.detail());
                self.notifier.error("Failed to update transaction");
                Err(e)
            }
        }
    }

    /// Delete on the server, then drop the matching record if it is loaded
    pub async fn delete(&self, user_id: i64, transaction_id: i64) -> Result<(), ApiError> {
        match self.api.delete_transaction(user_id, transaction_id).await {
            Ok(()) => {
                info!("Deleted transaction {}", transaction_id);
                self.state.send_modify(|s| {
                    if let Some(index) = s.transactions.iter().position(|t| t.id == transaction_id) {
                        s.transactions.remove(index);
                    }
                });
                self.notifier.success("Transaction deleted successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete transaction {}: {}", transaction_id, e.detail());
                self.notifier.error("Failed to delete transaction");
                Err(e)
            }
        }
    }

    /// Merge into the active filters; callers re-fetch when they want new data
    pub fn set_filters(&self, update: FilterUpdate) {
        self.state.send_modify(|s| s.filters.merge(update));
    }

    pub fn clear_filters(&self) {
        self.state.send_modify(|s| s.filters = TransactionFilters::default());
    }
}
