//! Financial aggregator
//!
//! Derives monthly metrics from a full scan of the order ledger and merges
//! them with the persisted month record. The two field classes must stay
//! separate: the scan-derived fields overwrite on every recompute, while the
//! persisted counters (`completed_count`, `cancelled_count`,
//! `invoiced_total`) only ever move when the ledger transitions an order's
//! status — recounting them from current statuses would be consistent by
//! coincidence, since a completed order can later be revised.

use crate::money;
use crate::storage::{Storage, StorageResult};
use crate::utils::time::current_month;
use rust_decimal::Decimal;
use shared::models::{MonthlyMetrics, PaymentMethodTotals};
use shared::order::{Order, OrderStatus, PaymentMethod};

/// Per-method revenue buckets, accumulated in `Decimal` and rounded once
/// on the way out
#[derive(Default)]
struct MethodAccumulator {
    cash: Decimal,
    pix: Decimal,
    debit: Decimal,
    credit: Decimal,
    other: Decimal,
}

impl MethodAccumulator {
    fn add(&mut self, method: PaymentMethod, amount: f64) {
        let amount = money::to_decimal(amount);
        match method {
            PaymentMethod::Cash => self.cash += amount,
            PaymentMethod::Pix => self.pix += amount,
            PaymentMethod::Debit => self.debit += amount,
            PaymentMethod::Credit => self.credit += amount,
            PaymentMethod::Other => self.other += amount,
        }
    }

    fn into_totals(self) -> PaymentMethodTotals {
        PaymentMethodTotals {
            cash: money::to_f64(self.cash),
            pix: money::to_f64(self.pix),
            debit: money::to_f64(self.debit),
            credit: money::to_f64(self.credit),
            other: money::to_f64(self.other),
        }
    }
}

/// Read-only metrics derivation over the ledger's orders
pub struct FinancialAggregator {
    storage: Storage,
}

impl FinancialAggregator {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Compute the current month's metrics from the given orders
    ///
    /// Storage is touched only to read the persisted month record; a zeroed
    /// record stands in when none exists yet. Never mutates orders.
    pub fn compute(&self, orders: &[Order]) -> StorageResult<MonthlyMetrics> {
        let month = current_month();
        self.compute_for_month(orders, &month)
    }

    fn compute_for_month(&self, orders: &[Order], month: &str) -> StorageResult<MonthlyMetrics> {
        let mut revenue = Decimal::ZERO;
        let mut pending = Decimal::ZERO;
        let mut by_method = MethodAccumulator::default();
        let mut month_completed = 0i64;
        let mut month_cancelled = 0i64;

        for order in orders {
            let net_total = money::net_total(
                money::items_subtotal(&order.items),
                order.discount_percent,
            );
            let paid = money::to_decimal(order.amount_paid);

            revenue += paid;

            let remaining = net_total - paid;
            if remaining > Decimal::ZERO && order.status != OrderStatus::Cancelled {
                pending += remaining;
            }

            for payment in &order.payments {
                by_method.add(payment.method, payment.amount);
            }

            if order.created_month() == month {
                match order.status {
                    OrderStatus::Completed => month_completed += 1,
                    OrderStatus::Cancelled => month_cancelled += 1,
                    OrderStatus::Pending => {}
                }
            }
        }

        // Persisted counters pass through unchanged; everything else is
        // overwritten by this scan.
        let stored = self
            .storage
            .get_metrics(month)?
            .unwrap_or_else(|| MonthlyMetrics::zeroed(month));

        Ok(MonthlyMetrics {
            month: month.to_string(),
            completed_count: stored.completed_count,
            cancelled_count: stored.cancelled_count,
            invoiced_total: stored.invoiced_total,
            revenue_total: money::to_f64(revenue),
            pending_total: money::to_f64(pending),
            by_method: by_method.into_totals(),
            month_completed,
            month_cancelled,
        })
    }
}
