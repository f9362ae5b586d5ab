//! `/users/{userId}/transactions` endpoints

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ApiClient, ApiError};
use crate::models::{
    MonthlySummary, PageEnvelope, Transaction, TransactionFilters, TransactionInput, YearlySummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Parameters for one page of the transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: &'static str,
    pub sort_direction: SortDirection,
    pub filters: TransactionFilters,
}

impl ListQuery {
    /// Newest first by transaction date
    pub fn newest_first(page: u32, size: u32, filters: TransactionFilters) -> Self {
        Self {
            page,
            size,
            sort_by: "transactionDate",
            sort_direction: SortDirection::Desc,
            filters,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.to_string()),
            ("sortDirection", self.sort_direction.as_str().to_string()),
        ];
        params.extend(self.filters.to_query());
        params
    }
}

fn collection(user_id: i64) -> String {
    format!("/users/{}/transactions", user_id)
}

fn item(user_id: i64, transaction_id: i64) -> String {
    format!("/users/{}/transactions/{}", user_id, transaction_id)
}

impl ApiClient {
    /// GET /users/{userId}/transactions
    pub async fn list_transactions(
        &self,
        user_id: i64,
        query: &ListQuery,
    ) -> Result<PageEnvelope<Transaction>, ApiError> {
        self.get(&collection(user_id), &query.to_params()).await
    }

    /// GET /users/{userId}/transactions/{transactionId}
    pub async fn get_transaction(&self, user_id: i64, transaction_id: i64) -> Result<Transaction, ApiError> {
        self.get(&item(user_id, transaction_id), &[]).await
    }

    /// GET /users/{userId}/transactions/recent
    ///
    /// The server returns at most ten, newest first.
    pub async fn recent_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("{}/recent", collection(user_id)), &[]).await
    }

    /// POST /users/{userId}/transactions
    pub async fn create_transaction(
        &self,
        user_id: i64,
        input: &TransactionInput,
    ) -> Result<Transaction, ApiError> {
        self.post(&collection(user_id), input).await
    }

    /// PUT /users/{userId}/transactions/{transactionId}
    pub async fn update_transaction(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: &TransactionInput,
    ) -> Result<Transaction, ApiError> {
        self.put(&item(user_id, transaction_id), input).await
    }

    /// DELETE /users/{userId}/transactions/{transactionId}
    pub async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<(), ApiError> {
        self.delete(&item(user_id, transaction_id)).await
    }

    /// GET /users/{userId}/transactions/summary/monthly
    pub async fn monthly_summary(&self, user_id: i64, month: u32, year: i32) -> Result<MonthlySummary, ApiError> {
        let query = [("month", month.to_string()), ("year", year.to_string())];
        self.get(&format!("{}/summary/monthly", collection(user_id)), &query).await
    }

    /// GET /users/{userId}/transactions/summary/yearly
    pub async fn yearly_summary(&self, user_id: i64, year: i32) -> Result<YearlySummary, ApiError> {
        let query = [("year", year.to_string())];
        self.get(&format!("{}/summary/yearly", collection(user_id)), &query).await
    }

    /// GET /users/{userId}/transactions/spending/category/{categoryId}
    pub async fn category_spending(
        &self,
        user_id: i64,
        category_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Decimal, ApiError> {
        let query = [
            ("startDate", start_date.format("%Y-%m-%d").to_string()),
            ("endDate", end_date.format("%Y-%m-%d").to_string()),
        ];
        self.get(
            &format!("{}/spending/category/{}", collection(user_id), category_id),
            &query,
        )
        .await
    }
}
