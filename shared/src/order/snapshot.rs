//! Persisted order snapshot

use super::types::{GarmentLineItem, OrderStatus, PaymentRecord};
use serde::{Deserialize, Serialize};

/// A finalized order in the ledger
///
/// Identity is immutable once created. Item and payment lists are deep copies
/// of the draft they were saved from; no array is ever shared with a live
/// draft. Orders are never deleted in normal flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the ledger at save time
    pub uuid: String,
    pub client_id: String,
    /// Name snapshot; later client renames do not reach historic orders
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    /// Delivery date, `YYYY-MM-DD`
    pub delivery_date: String,
    /// Delivery time, `HH:MM`; empty when unscheduled (sorts first)
    #[serde(default)]
    pub delivery_time: String,
    pub items: Vec<GarmentLineItem>,
    pub status: OrderStatus,
    /// Creation date, `YYYY-MM-DD`; its `YYYY-MM` prefix scopes the order to
    /// a metrics month
    pub created_date: String,
    pub payments: Vec<PaymentRecord>,
    /// Cumulative amount paid, kept equal to the sum of `payments`
    pub amount_paid: f64,
    /// Discount percentage, >= 0
    #[serde(default)]
    pub discount_percent: f64,
}

impl Order {
    /// `YYYY-MM` prefix of the creation date
    pub fn created_month(&self) -> &str {
        if self.created_date.len() >= 7 {
            &self.created_date[..7]
        } else {
            &self.created_date
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_month_is_date_prefix() {
        let order = Order {
            uuid: "o1".to_string(),
            client_id: "c1".to_string(),
            client_name: "MARIA".to_string(),
            client_phone: None,
            delivery_date: "2026-09-01".to_string(),
            delivery_time: String::new(),
            items: vec![],
            status: OrderStatus::Pending,
            created_date: "2026-08-26".to_string(),
            payments: vec![],
            amount_paid: 0.0,
            discount_percent: 0.0,
        };
        assert_eq!(order.created_month(), "2026-08");
    }
}
