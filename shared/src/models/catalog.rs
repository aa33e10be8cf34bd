//! Catalog Model - food items and device configuration

use serde::{Deserialize, Serialize};

use crate::models::booking::Category;

/// Food item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub current_stock: i64,
    /// Restock warning threshold
    pub min_stock_level: i64,
    pub created_at: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub current_stock: Option<i64>,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
}

/// Update food item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FoodItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub min_stock_level: Option<i64>,
}

/// Stock movement direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockAdjustKind {
    Add,
    Remove,
}

/// Adjust stock for one food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjust {
    pub quantity: i64,
    #[serde(rename = "type")]
    pub kind: StockAdjustKind,
    pub notes: Option<String>,
}

/// Seats available per category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeviceConfig {
    pub id: i64,
    pub category: Category,
    pub seat_count: i64,
    /// Derived seat labels ("PC-1".."PC-5"), regenerated on every upsert
    #[cfg_attr(feature = "db", sqlx(json))]
    pub seats: Vec<String>,
    pub updated_at: i64,
}

/// Set the seat count for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfigUpsert {
    pub category: Category,
    pub seat_count: i64,
}

/// Build the seat label list for a category ("PS5-1".."PS5-3").
pub fn seat_names(category: Category, count: i64) -> Vec<String> {
    (1..=count)
        .map(|n| format!("{}-{}", category.seat_prefix(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_names_follow_category_prefix() {
        assert_eq!(
            seat_names(Category::Pc, 3),
            vec!["PC-1", "PC-2", "PC-3"]
        );
        assert_eq!(seat_names(Category::Ps5, 1), vec!["PS5-1"]);
        assert!(seat_names(Category::Pc, 0).is_empty());
    }

    #[test]
    fn stock_adjust_wire_shape() {
        let adj: StockAdjust =
            serde_json::from_str(r#"{"quantity":5,"type":"add","notes":null}"#).unwrap();
        assert_eq!(adj.kind, StockAdjustKind::Add);
        assert_eq!(adj.quantity, 5);
    }
}
