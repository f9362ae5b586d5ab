//! Transaction models

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Direction of money flow for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "EXPENSE",
            TransactionType::Income => "INCOME",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXPENSE" => Ok(TransactionType::Expense),
            "INCOME" => Ok(TransactionType::Income),
            other => Err(format!("Unknown transaction type '{}' (expected EXPENSE or INCOME)", other)),
        }
    }
}

/// A transaction record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Option<Category>,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Transaction {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }
}

/// Request body for creating or updating a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Active filter set for transaction listing
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
}

impl TransactionFilters {
    /// Shallow-merge a partial update; fields the update does not mention are kept
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query parameters for the non-null filters
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category_id) = self.category_id {
            params.push(("categoryId", category_id.to_string()));
        }
        if let Some(start_date) = self.start_date {
            params.push(("startDate", start_date.format("%Y-%m-%d").to_string()));
        }
        if let Some(end_date) = self.end_date {
            params.push(("endDate", end_date.format("%Y-%m-%d").to_string()));
        }
        if let Some(kind) = self.kind {
            params.push(("type", kind.as_str().to_string()));
        }
        params
    }
}

/// Partial filter update.
///
/// The outer `Option` says whether the field is touched at all; the inner one is
/// the new value, so `Some(None)` explicitly clears a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub category_id: Option<Option<i64>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub kind: Option<Option<TransactionType>>,
}

impl FilterUpdate {
    pub fn category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: Option<NaiveDate>) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Sum of amounts of the given type
pub fn total_of<'a, I>(transactions: I, kind: TransactionType) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_from_server_json() {
        let raw = serde_json::json!({
            "id": 7,
            "amount": 12.50,
            "type": "EXPENSE",
            "transactionDate": "2024-03-01",
            "description": "Lunch",
            "category": { "id": 2, "name": "Food", "isSystem": true },
            "createdAt": "2024-03-01T12:30:00.123456"
        });

        let tx: Transaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.amount, Decimal::new(1250, 2));
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.transaction_date, date(2024, 3, 1));
        assert_eq!(tx.category_name(), "Food");
        assert!(tx.created_at.is_some());
    }

    #[test]
    fn test_input_serializes_camel_case() {
        let input = TransactionInput {
            amount: Decimal::new(999, 2),
            description: None,
            transaction_date: date(2024, 1, 31),
            category_id: 4,
            kind: TransactionType::Income,
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["transactionDate"], "2024-01-31");
        assert_eq!(value["categoryId"], 4);
        assert_eq!(value["type"], "INCOME");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut filters = TransactionFilters {
            category_id: Some(3),
            kind: Some(TransactionType::Expense),
            ..Default::default()
        };

        filters.merge(FilterUpdate::default().start_date(Some(date(2024, 1, 1))));
        assert_eq!(filters.category_id, Some(3));
        assert_eq!(filters.kind, Some(TransactionType::Expense));
        assert_eq!(filters.start_date, Some(date(2024, 1, 1)));

        filters.merge(FilterUpdate::default().category(None));
        assert_eq!(filters.category_id, None);
        assert_eq!(filters.kind, Some(TransactionType::Expense));
    }

    #[test]
    fn test_query_omits_null_filters() {
        assert!(TransactionFilters::default().to_query().is_empty());

        let filters = TransactionFilters {
            category_id: None,
            start_date: Some(date(2024, 2, 1)),
            end_date: Some(date(2024, 2, 29)),
            kind: Some(TransactionType::Income),
        };
        let query = filters.to_query();
        assert_eq!(
            query,
            vec![
                ("startDate", "2024-02-01".to_string()),
                ("endDate", "2024-02-29".to_string()),
                ("type", "INCOME".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_type_case_insensitive() {
        assert_eq!("expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert_eq!(" Income ".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
