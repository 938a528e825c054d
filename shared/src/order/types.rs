//! Order building blocks shared between the draft builder and the ledger

use crate::models::Client;
use serde::{Deserialize, Serialize};

// ============================================================================
// Payment Types
// ============================================================================

/// Payment method
///
/// Stored records from other sources may carry methods this enum does not
/// know; those bucket into `Other` on deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    Debit,
    Credit,
    #[serde(other)]
    Other,
}

/// Payment record on a draft or persisted order
///
/// Append-only within an order; removal is by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub method: PaymentMethod,
    pub amount: f64,
    /// Epoch milliseconds at the time the payment was recorded
    pub received_at: i64,
}

// ============================================================================
// Line Items
// ============================================================================

/// One service applied to a garment line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub uuid: String,
    /// Catalog service identifier
    pub service_id: String,
    /// Name snapshot taken at attach time
    pub name: String,
    /// Positive quantity
    pub quantity: i32,
    /// Unit price captured at attach time; catalog price changes never
    /// propagate here.
    pub unit_price: f64,
}

/// One physical piece in an order, with its own services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentLineItem {
    pub uuid: String,
    /// Catalog garment type identifier
    pub garment_type_id: String,
    /// Name snapshot taken at attach time
    pub garment_name: String,
    /// 1-based position among the order's garments; always a dense 1..N run,
    /// renumbered after removals
    pub line_number: u32,
    pub services: Vec<ServiceLine>,
}

// ============================================================================
// Order Status
// ============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

// ============================================================================
// Draft Client
// ============================================================================

/// Client selection on a draft order
///
/// `EditingExisting` carries the denormalized name/phone of an order being
/// edited whose original client record is not re-resolved; it passes the
/// selection-required check at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftClient {
    #[default]
    Unselected,
    Selected(Client),
    EditingExisting {
        name: String,
        phone: Option<String>,
    },
}

impl DraftClient {
    /// Whether save may proceed
    pub fn is_set(&self) -> bool {
        !matches!(self, DraftClient::Unselected)
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            DraftClient::Unselected => None,
            DraftClient::Selected(c) => Some(&c.name),
            DraftClient::EditingExisting { name, .. } => Some(name),
        }
    }
}

// ============================================================================
// Derived Totals
// ============================================================================

/// Derived draft/order totals, never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum over garments over services of quantity x unit price
    pub subtotal: f64,
    /// Subtotal after the discount percentage
    pub total: f64,
    pub total_paid: f64,
    /// max(0, total - total_paid)
    pub remaining: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CASH\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Debit).unwrap(),
            "\"DEBIT\""
        );
    }

    #[test]
    fn unknown_payment_method_buckets_into_other() {
        let m: PaymentMethod = serde_json::from_str("\"CHEQUE\"").unwrap();
        assert_eq!(m, PaymentMethod::Other);
    }

    #[test]
    fn order_status_round_trips() {
        let s: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(s, OrderStatus::Cancelled);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn draft_client_selection_check() {
        assert!(!DraftClient::Unselected.is_set());
        assert!(
            DraftClient::EditingExisting {
                name: "MARIA".to_string(),
                phone: None,
            }
            .is_set()
        );
    }
}
