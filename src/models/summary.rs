//! Report summaries computed server-side

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category_id: i64,
    pub category_name: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    #[serde(default)]
    pub category_breakdown: Vec<CategorySpending>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub average_monthly_expense: Decimal,
}
