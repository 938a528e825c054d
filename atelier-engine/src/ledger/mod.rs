//! Order ledger
//!
//! Owns the persisted orders and the monthly counters attached to status
//! transitions. All mutations go through here so the counter rules hold:
//! an order moves `completed_count`/`invoiced_total` when it transitions
//! into COMPLETED from another status, and `cancelled_count` likewise for
//! CANCELLED. Re-applying the current status is a no-op, and edits to a
//! counted order never touch the counters.

use crate::metrics::FinancialAggregator;
use crate::money;
use crate::storage::{Storage, StorageError};
use crate::utils::time::current_month;
use parking_lot::RwLock;
use shared::models::MonthlyMetrics;
use shared::order::{GarmentLineItem, Order, OrderStatus, PaymentRecord};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

pub struct OrderLedger {
    storage: Storage,
    aggregator: Arc<FinancialAggregator>,
    orders: RwLock<Vec<Order>>,
    metrics: RwLock<Option<MonthlyMetrics>>,
}

impl OrderLedger {
    pub fn new(storage: Storage, aggregator: Arc<FinancialAggregator>) -> Self {
        Self {
            storage,
            aggregator,
            orders: RwLock::new(Vec::new()),
            metrics: RwLock::new(None),
        }
    }

    /// Load all orders from storage and derive the current month's metrics
    pub fn load(&self) -> LedgerResult<()> {
        let orders = self.storage.get_orders()?;
        tracing::info!("Loaded {} orders", orders.len());
        *self.orders.write() = orders;
        self.recompute_metrics();
        Ok(())
    }

    /// Persist a new order, assigning it an identifier
    ///
    /// Orders always enter the ledger as PENDING regardless of how much has
    /// been paid; counters move only on an explicit status transition.
    pub fn add(&self, mut order: Order) -> LedgerResult<String> {
        order.uuid = Uuid::new_v4().to_string();
        order.status = OrderStatus::Pending;
        self.storage.put_order(&order)?;
        tracing::info!(order_id = %order.uuid, client = %order.client_name, "Order created");

        let uuid = order.uuid.clone();
        self.orders.write().push(order);
        self.recompute_metrics();
        Ok(uuid)
    }

    /// Transition an order's status, moving the monthly counters on entry
    /// into a terminal state
    ///
    /// A missing order id is logged and ignored, as is re-applying the
    /// current status.
    pub fn set_status(&self, order_id: &str, new_status: OrderStatus) -> LedgerResult<()> {
        let Some(mut order) = self.storage.get_order(order_id)? else {
            tracing::warn!(order_id, "Status change for unknown order ignored");
            return Ok(());
        };

        let prior = order.status;
        if prior == new_status {
            return Ok(());
        }

        order.status = new_status;
        self.storage.put_order(&order)?;

        match new_status {
            OrderStatus::Completed if prior != OrderStatus::Completed => {
                let month = current_month();
                let mut record = self
                    .storage
                    .get_metrics(&month)?
                    .unwrap_or_else(|| MonthlyMetrics::zeroed(&month));
                record.completed_count += 1;
                record.invoiced_total = money::to_f64(
                    money::to_decimal(record.invoiced_total)
                        + money::to_decimal(money::order_net_total(&order)),
                );
                self.storage.put_metrics(&record)?;
                tracing::info!(order_id, month = %month, "Order completed");
            }
            OrderStatus::Cancelled if prior != OrderStatus::Cancelled => {
                let month = current_month();
                let mut record = self
                    .storage
                    .get_metrics(&month)?
                    .unwrap_or_else(|| MonthlyMetrics::zeroed(&month));
                record.cancelled_count += 1;
                self.storage.put_metrics(&record)?;
                tracing::info!(order_id, month = %month, "Order cancelled");
            }
            _ => {}
        }

        self.replace_cached(order);
        self.recompute_metrics();
        Ok(())
    }

    /// Replace an order's line items, payments and discount after an edit
    ///
    /// `amount_paid` is recomputed from the new payment list. Monthly
    /// counters are left alone even when the order was already counted.
    pub fn revise_items_and_payments(
        &self,
        order_id: &str,
        items: Vec<GarmentLineItem>,
        payments: Vec<PaymentRecord>,
        discount_percent: f64,
    ) -> LedgerResult<()> {
        let Some(mut order) = self.storage.get_order(order_id)? else {
            tracing::warn!(order_id, "Revision for unknown order ignored");
            return Ok(());
        };

        order.amount_paid = money::to_f64(money::payments_total(&payments));
        order.items = items;
        order.payments = payments;
        order.discount_percent = discount_percent;
        self.storage.put_order(&order)?;
        tracing::info!(order_id, "Order revised");

        self.replace_cached(order);
        self.recompute_metrics();
        Ok(())
    }

    /// Record an updated payment list against an order
    pub fn register_payment(
        &self,
        order_id: &str,
        payments: Vec<PaymentRecord>,
        total_paid: f64,
    ) -> LedgerResult<()> {
        let Some(mut order) = self.storage.get_order(order_id)? else {
            tracing::warn!(order_id, "Payment for unknown order ignored");
            return Ok(());
        };

        order.payments = payments;
        order.amount_paid = total_paid;
        self.storage.put_order(&order)?;
        tracing::info!(order_id, total_paid, "Payment registered");

        self.replace_cached(order);
        self.recompute_metrics();
        Ok(())
    }

    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.read().iter().find(|o| o.uuid == order_id).cloned()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    /// Orders due on the given date, earliest delivery time first
    ///
    /// Times are `HH:MM` strings so lexical order is chronological; orders
    /// without a time sort ahead of timed ones.
    pub fn orders_for_delivery_date(&self, date: &str) -> Vec<Order> {
        let mut due: Vec<Order> = self
            .orders
            .read()
            .iter()
            .filter(|o| o.delivery_date == date)
            .cloned()
            .collect();
        due.sort_by(|a, b| a.delivery_time.cmp(&b.delivery_time));
        due
    }

    pub fn current_metrics(&self) -> Option<MonthlyMetrics> {
        self.metrics.read().clone()
    }

    fn replace_cached(&self, order: Order) {
        let mut orders = self.orders.write();
        if let Some(slot) = orders.iter_mut().find(|o| o.uuid == order.uuid) {
            *slot = order;
        } else {
            orders.push(order);
        }
    }

    /// Rederive the month's metrics from the cached orders
    ///
    /// On a storage failure the previous snapshot is kept; serving stale
    /// metrics beats poisoning the cache.
    fn recompute_metrics(&self) {
        let orders = self.orders.read();
        match self.aggregator.compute(&orders) {
            Ok(metrics) => *self.metrics.write() = Some(metrics),
            Err(e) => tracing::error!("Failed to recompute metrics: {e}"),
        }
    }
}
