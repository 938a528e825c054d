//! Monthly financial metrics
//!
//! One record per calendar month, keyed by `YYYY-MM`. The record mixes two
//! classes of fields:
//!
//! - persisted counters (`completed_count`, `cancelled_count`,
//!   `invoiced_total`) — incremented exactly once per status transition by
//!   the order ledger and never overwritten by a recompute;
//! - derived fields (everything else) — recomputed from a full ledger scan
//!   every time metrics are requested, then merged over the stored record.

use serde::{Deserialize, Serialize};

/// Revenue totals broken down by payment method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodTotals {
    pub cash: f64,
    pub pix: f64,
    pub debit: f64,
    pub credit: f64,
    pub other: f64,
}

/// Monthly metrics record, keyed by `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMetrics {
    /// Month key, `YYYY-MM`
    pub month: String,

    // === Persisted counters (increment-on-event, never recomputed) ===
    /// Orders completed this month, bumped once per transition into COMPLETED
    pub completed_count: i64,
    /// Orders cancelled this month, bumped once per transition into CANCELLED
    pub cancelled_count: i64,
    /// Net totals invoiced this month, bumped together with `completed_count`
    pub invoiced_total: f64,

    // === Derived on read (full ledger scan) ===
    /// Sum of paid amounts across all orders
    #[serde(default)]
    pub revenue_total: f64,
    /// Sum of outstanding balances over non-cancelled orders
    #[serde(default)]
    pub pending_total: f64,
    /// Revenue split by payment method
    #[serde(default)]
    pub by_method: PaymentMethodTotals,
    /// Orders created this month that are currently COMPLETED
    #[serde(default)]
    pub month_completed: i64,
    /// Orders created this month that are currently CANCELLED
    #[serde(default)]
    pub month_cancelled: i64,
}

impl MonthlyMetrics {
    /// A zeroed record for a month with no stored state yet
    pub fn zeroed(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            completed_count: 0,
            cancelled_count: 0,
            invoiced_total: 0.0,
            revenue_total: 0.0,
            pending_total: 0.0,
            by_method: PaymentMethodTotals::default(),
            month_completed: 0,
            month_cancelled: 0,
        }
    }
}
