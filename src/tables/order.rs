//! Purchase order lines

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A purchase order line as read from supplier_orders.csv
///
/// Every field is kept as raw text; blank cells become `None`. Coercion to
/// typed values (and the data-quality bookkeeping that goes with it) happens
/// in the dataset builder, never here.
#[derive(Debug, Clone, Default)]
pub struct RawOrder {
    pub order_id: Option<String>,
    pub part_number: Option<String>,
    pub part_description: Option<String>,
    pub supplier_name: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub order_date: Option<String>,
    pub promised_date: Option<String>,
    pub actual_delivery_date: Option<String>,
}

/// A purchase order line with parsed dates and derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,

    pub part_number: String,

    pub part_description: String,

    /// Supplier name as it appears in the source data (display form)
    pub supplier_name: String,

    /// Canonical supplier name, used only for matching and grouping
    #[serde(default)]
    pub supplier_norm: String,

    /// Ordered quantity; 0 when the source cell is missing or malformed
    #[serde(default)]
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promised_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<NaiveDate>,

    /// Whole days between actual delivery and promise; 0 when either date is
    /// missing. Missing delivery data therefore reads as "on time", which
    /// biases lateness metrics downward for incomplete records.
    #[serde(default)]
    pub days_late: i64,
}

impl Order {
    /// Recompute days_late from the promise/delivery pair
    pub fn computed_days_late(&self) -> i64 {
        match (self.actual_delivery_date, self.promised_date) {
            (Some(actual), Some(promised)) => (actual - promised).num_days(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn base_order() -> Order {
        Order {
            order_id: "PO-1001".to_string(),
            part_number: "HX-100".to_string(),
            part_description: "Heat Exchanger Plate".to_string(),
            supplier_name: "Acme Inc.".to_string(),
            supplier_norm: String::new(),
            quantity: 50,
            unit_price: Some(12.5),
            order_date: Some(date("2024-01-02")),
            promised_date: Some(date("2024-02-01")),
            actual_delivery_date: Some(date("2024-02-08")),
            days_late: 0,
        }
    }

    #[test]
    fn test_days_late_from_dates() {
        let order = base_order();
        assert_eq!(order.computed_days_late(), 7);
    }

    #[test]
    fn test_days_late_early_delivery_is_negative() {
        let mut order = base_order();
        order.actual_delivery_date = Some(date("2024-01-25"));
        assert_eq!(order.computed_days_late(), -7);
    }

    #[test]
    fn test_days_late_missing_date_is_zero() {
        let mut order = base_order();
        order.actual_delivery_date = None;
        assert_eq!(order.computed_days_late(), 0);

        let mut order = base_order();
        order.promised_date = None;
        assert_eq!(order.computed_days_late(), 0);
    }
}
