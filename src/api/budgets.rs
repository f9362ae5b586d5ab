//! `/users/{userId}/budgets` endpoints

use super::{ApiClient, ApiError};
use crate::models::{Budget, BudgetAlert, BudgetInput, BudgetStatus};

fn collection(user_id: i64) -> String {
    format!("/users/{}/budgets", user_id)
}

impl ApiClient {
    /// GET /users/{userId}/budgets
    pub async fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>, ApiError> {
        self.get(&collection(user_id), &[]).await
    }

    /// GET /users/{userId}/budgets/{budgetId}
    pub async fn get_budget(&self, user_id: i64, budget_id: i64) -> Result<Budget, ApiError> {
        self.get(&format!("{}/{}", collection(user_id), budget_id), &[]).await
    }

    /// GET /users/{userId}/budgets/monthly
    pub async fn monthly_budgets(&self, user_id: i64, month: u32, year: i32) -> Result<Vec<BudgetStatus>, ApiError> {
        let query = [("month", month.to_string()), ("year", year.to_string())];
        self.get(&format!("{}/monthly", collection(user_id)), &query).await
    }

    /// GET /users/{userId}/budgets/category/{categoryId}/status
    pub async fn budget_status(
        &self,
        user_id: i64,
        category_id: i64,
        month: u32,
        year: i32,
    ) -> Result<BudgetStatus, ApiError> {
        let query = [("month", month.to_string()), ("year", year.to_string())];
        self.get(
            &format!("{}/category/{}/status", collection(user_id), category_id),
            &query,
        )
        .await
    }

    /// GET /users/{userId}/budgets/alerts
    pub async fn budget_alerts(&self, user_id: i64) -> Result<Vec<BudgetAlert>, ApiError> {
        self.get(&format!("{}/alerts", collection(user_id)), &[]).await
    }

    /// POST /users/{userId}/budgets
    ///
    /// The server upserts on (category, month, year).
    pub async fn create_budget(&self, user_id: i64, input: &BudgetInput) -> Result<Budget, ApiError> {
        self.post(&collection(user_id), input).await
    }

    /// PUT /users/{userId}/budgets/{budgetId}
    pub async fn update_budget(&self, user_id: i64, budget_id: i64, input: &BudgetInput) -> Result<Budget, ApiError> {
        self.put(&format!("{}/{}", collection(user_id), budget_id), input).await
    }

    /// DELETE /users/{userId}/budgets/{budgetId}
    pub async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{}", collection(user_id), budget_id)).await
    }
}
