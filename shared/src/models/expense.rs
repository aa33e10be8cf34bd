//! Expense Model

use serde::{Deserialize, Serialize};

/// Operating expense entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    /// Free-form bucket: "electricity", "snacks restock", ...
    pub category: String,
    pub description: String,
    pub amount: f64,
    /// When the expense was incurred (Unix millis)
    pub spent_at: i64,
    pub created_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub category: String,
    pub description: String,
    pub amount: f64,
    /// Defaults to now
    pub spent_at: Option<i64>,
}

/// Update expense payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExpenseUpdate {
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub spent_at: Option<i64>,
}
