//! Budget models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

pub const DEFAULT_ALERT_THRESHOLD: u8 = 80;

fn default_alert_threshold() -> u8 {
    DEFAULT_ALERT_THRESHOLD
}

/// Monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    /// Percentage of the budget at which an alert is raised
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Request body for creating or updating a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub amount: Decimal,
    pub category_id: i64,
    pub month: u32,
    pub year: i32,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Budget together with what has been spent against it for the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub is_near_limit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Medium,
    High,
}

/// Budget threshold warning for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: String,
    pub budget_amount: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub message: String,
    pub severity: AlertSeverity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_defaults_alert_threshold() {
        let budget: Budget = serde_json::from_value(serde_json::json!({
            "id": 1,
            "amount": 300,
            "month": 5,
            "year": 2024
        }))
        .unwrap();

        assert_eq!(budget.alert_threshold, 80);
        assert_eq!(budget.amount, Decimal::new(300, 0));
        assert!(budget.category.is_none());
    }

    #[test]
    fn test_alert_severity_parses() {
        let alert: BudgetAlert = serde_json::from_value(serde_json::json!({
            "category": "Food",
            "budgetAmount": 200,
            "spent": 210.5,
            "percentage": 105.25,
            "message": "You've spent 105% of your Food budget",
            "severity": "HIGH"
        }))
        .unwrap();

        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.spent, Decimal::new(2105, 1));
    }
}
