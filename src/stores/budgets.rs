//! Cached budgets for the current user

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Budget, BudgetAlert, BudgetInput, BudgetStatus};
use crate::notify::Notifier;

#[derive(Debug, Clone, Default)]
pub struct BudgetsState {
    pub budgets: Vec<Budget>,
    /// Spending status for the last month requested
    pub monthly: Vec<BudgetStatus>,
    pub alerts: Vec<BudgetAlert>,
    pub loading: bool,
    /// Each load only clears its own error
    pub budgets_error: Option<String>,
    pub monthly_error: Option<String>,
    pub alerts_error: Option<String>,
}

impl BudgetsState {
    /// First outstanding load error, if any
    pub fn error(&self) -> Option<&str> {
        self.budgets_error
            .as_deref()
            .or(self.monthly_error.as_deref())
            .or(self.alerts_error.as_deref())
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetStatus> {
        self.monthly.iter().filter(|s| s.is_over_budget)
    }
}

type ErrorSlot = fn(&mut BudgetsState) -> &mut Option<String>;

pub struct BudgetsStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<BudgetsState>,
}

impl BudgetsStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(BudgetsState::default());
        Self { api, notifier, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<BudgetsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BudgetsState {
        self.state.borrow().clone()
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.state.borrow().budgets.clone()
    }

    async fn load<T, F>(&self, what: &str, slot: ErrorSlot, request: F) -> Option<T>
    where
        F: std::future::Future<Output = Result<T, ApiError>>,
    {
        self.state.send_modify(|s| {
            s.loading = true;
            *slot(s) = None;
        });
        match request.await {
            Ok(value) => {
                self.state.send_modify(|s| s.loading = false);
                Some(value)
            }
            Err(e) => {
                error!("Failed to load {}: {}", what, e.detail());
                self.state.send_modify(|s| {
                    *slot(s) = Some(e.message());
                    s.loading = false;
                });
                self.notifier.error(&format!("Failed to load {}", what));
                None
            }
        }
    }

    pub async fn fetch(&self, user_id: i64) {
        if let Some(budgets) = self
            .load("budgets", |s| &mut s.budgets_error, self.api.list_budgets(user_id))
            .await
        {
            self.state.send_modify(|s| s.budgets = budgets);
        }
    }

    pub async fn fetch_monthly(&self, user_id: i64, month: u32, year: i32) {
        if let Some(monthly) = self
            .load("budget status", |s| &mut s.monthly_error, self.api.monthly_budgets(user_id, month, year))
            .await
        {
            self.state.send_modify(|s| s.monthly = monthly);
        }
    }

    pub async fn fetch_alerts(&self, user_id: i64) {
        if let Some(alerts) = self
            .load("budget alerts", |s| &mut s.alerts_error, self.api.budget_alerts(user_id))
            .await
        {
            for alert in &alerts {
                warn!("Budget alert ({:?}): {}", alert.severity, alert.message);
            }
            self.state.send_modify(|s| s.alerts = alerts);
        }
    }

    /// Create or replace the budget for a category/month; the server upserts
    pub async fn save(&self, user_id: i64, input: &BudgetInput) -> Result<Budget, ApiError> {
        match self.api.create_budget(user_id, input).await {
            Ok(saved) => {
                let record = saved.clone();
                self.state.send_modify(|s| upsert(&mut s.budgets, record));
                self.notifier.success("Budget saved successfully");
                Ok(saved)
            }
            Err(e) => {
                error!("Failed to save budget: {}", e.detail());
                self.notifier.error("Failed to save budget");
                Err(e)
            }
        }
    }

    pub async fn update(&self, user_id: i64, budget_id: i64, input: &BudgetInput) -> Result<Budget, ApiError> {
        match self.api.update_budget(user_id, budget_id, input).await {
            Ok(updated) => {
                let record = updated.clone();
                self.state.send_modify(|s| {
                    if let Some(slot) = s.budgets.iter_mut().find(|b| b.id == budget_id) {
                        *slot = record;
                    }
                });
                self.notifier.success("Budget updated successfully");
                Ok(updated)
            }
            Err(e) => {
                error!("Failed to update budget {}: {}", budget_id, e.detail());
                self.notifier.error("Failed to update budget");
                Err(e)
            }
        }
    }

    pub async fn delete(&self, user_id: i64, budget_id: i64) -> Result<(), ApiError> {
        match self.api.delete_budget(user_id, budget_id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.budgets.retain(|b| b.id != budget_id);
                    s.monthly.retain(|m| m.budget.id != budget_id);
                });
                self.notifier.success("Budget deleted successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete budget {}: {}", budget_id, e.detail());
                self.notifier.error("Failed to delete budget");
                Err(e)
            }
        }
    }
}

fn upsert(budgets: &mut Vec<Budget>, budget: Budget) {
    match budgets.iter_mut().find(|b| b.id == budget.id) {
        Some(slot) => *slot = budget,
        None => budgets.push(budget),
    }
}
