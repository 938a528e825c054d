//! Draft order builder
//!
//! A single mutable in-progress order per editing session. The builder
//! depends on nothing external: the form layer feeds it catalog entries and
//! raw input, and calls [`DraftOrder::totals`] after any mutation instead of
//! relying on reactive recomputation.
//!
//! Mutations on identifiers that no longer exist are warn-and-ignore: the UI
//! serializes user actions, so a stale id means the row was already removed.
//! Numeric input is bounds-checked here via `money::validate_*` rather than
//! trusted from the form layer; out-of-bounds values are logged and ignored
//! the same way.

use crate::money;
use crate::utils::time::{now_millis, today_string};
use shared::models::{Client, GarmentType, Service};
use shared::order::{
    DraftClient, GarmentLineItem, Order, OrderStatus, OrderTotals, PaymentMethod, PaymentRecord,
    ServiceLine,
};
use thiserror::Error;

/// Draft-level failures
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("a client must be selected before saving the order")]
    ClientNotSelected,
}

/// The in-progress order being composed
#[derive(Debug, Clone)]
pub struct DraftOrder {
    pub client: DraftClient,
    /// `YYYY-MM-DD`, defaults to today
    pub delivery_date: String,
    /// `HH:MM`, empty when unscheduled
    pub delivery_time: String,
    pub items: Vec<GarmentLineItem>,
    pub payments: Vec<PaymentRecord>,
    pub discount_percent: f64,
}

impl Default for DraftOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftOrder {
    /// An empty draft delivering today, zero discount
    pub fn new() -> Self {
        Self {
            client: DraftClient::Unselected,
            delivery_date: today_string(),
            delivery_time: String::new(),
            items: Vec::new(),
            payments: Vec::new(),
            discount_percent: 0.0,
        }
    }

    /// Clear back to an empty draft
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replace the selected client
    pub fn set_client(&mut self, client: Client) {
        self.client = DraftClient::Selected(client);
    }

    /// Carry an existing order's denormalized client through an edit session
    pub fn set_editing_client(&mut self, name: String, phone: Option<String>) {
        self.client = DraftClient::EditingExisting { name, phone };
    }

    /// Append a garment line item with the next dense line number; returns
    /// the new line's id
    pub fn add_garment(&mut self, garment_type: &GarmentType) -> String {
        let item = GarmentLineItem {
            uuid: uuid::Uuid::new_v4().to_string(),
            garment_type_id: garment_type.uuid.clone(),
            garment_name: garment_type.name.clone(),
            line_number: self.items.len() as u32 + 1,
            services: Vec::new(),
        };
        let id = item.uuid.clone();
        self.items.push(item);
        id
    }

    /// Attach a service line to a garment
    ///
    /// The unit price is passed explicitly and is never re-read from the
    /// service's current catalog price. Unknown garment ids and invalid
    /// quantity/price combinations are ignored.
    pub fn add_service_to_garment(
        &mut self,
        garment_uuid: &str,
        service: &Service,
        quantity: i32,
        unit_price: f64,
    ) {
        if let Err(e) = money::validate_service_line(quantity, unit_price) {
            tracing::warn!(quantity, unit_price, "add_service_to_garment: {e}");
            return;
        }
        let Some(garment) = self.items.iter_mut().find(|g| g.uuid == garment_uuid) else {
            tracing::warn!(garment_uuid, "add_service_to_garment: garment not in draft");
            return;
        };
        garment.services.push(ServiceLine {
            uuid: uuid::Uuid::new_v4().to_string(),
            service_id: service.uuid.clone(),
            name: service.name.clone(),
            quantity,
            unit_price,
        });
    }

    /// Remove a garment and renumber the remainder to a dense 1..N run
    pub fn remove_garment(&mut self, garment_uuid: &str) {
        self.items.retain(|g| g.uuid != garment_uuid);
        for (index, garment) in self.items.iter_mut().enumerate() {
            garment.line_number = index as u32 + 1;
        }
    }

    /// Remove a service line from a garment; unknown ids are ignored
    pub fn remove_service_from_garment(&mut self, garment_uuid: &str, service_line_uuid: &str) {
        let Some(garment) = self.items.iter_mut().find(|g| g.uuid == garment_uuid) else {
            tracing::warn!(garment_uuid, "remove_service_from_garment: garment not in draft");
            return;
        };
        garment.services.retain(|s| s.uuid != service_line_uuid);
    }

    /// Record a payment, timestamped now
    ///
    /// Non-positive and out-of-range amounts are ignored. Overpayment is
    /// allowed; the remaining balance clamps at zero.
    pub fn add_payment(&mut self, method: PaymentMethod, amount: f64) {
        if let Err(e) = money::validate_payment_amount(amount) {
            tracing::warn!(amount, "add_payment: {e}");
            return;
        }
        self.payments.push(PaymentRecord {
            method,
            amount,
            received_at: now_millis(),
        });
    }

    /// Remove a payment by position; out-of-range indices are ignored
    pub fn remove_payment(&mut self, index: usize) {
        if index >= self.payments.len() {
            tracing::warn!(index, count = self.payments.len(), "remove_payment: index out of range");
            return;
        }
        self.payments.remove(index);
    }

    /// Set the discount percentage, clamped at zero (no upper bound)
    pub fn set_discount(&mut self, percent: f64) {
        let clamped = percent.max(0.0);
        if let Err(e) = money::validate_discount(clamped) {
            tracing::warn!(percent, "set_discount: {e}");
            return;
        }
        self.discount_percent = clamped;
    }

    /// Derived totals; pure, no side effects
    pub fn totals(&self) -> OrderTotals {
        money::compute_totals(&self.items, &self.payments, self.discount_percent)
    }

    /// Snapshot the draft into a PENDING order ready for the ledger
    ///
    /// Fails when no client is selected. The returned order's `uuid` is empty;
    /// the ledger assigns it at save time. Items and payments are deep copies,
    /// never aliases of the draft's lists.
    pub fn to_order(&self) -> Result<Order, DraftError> {
        let (client_id, client_name, client_phone) = match &self.client {
            DraftClient::Unselected => return Err(DraftError::ClientNotSelected),
            DraftClient::Selected(c) => (c.uuid.clone(), c.name.clone(), c.phone.clone()),
            DraftClient::EditingExisting { name, phone } => {
                (String::new(), name.clone(), phone.clone())
            }
        };

        Ok(Order {
            uuid: String::new(),
            client_id,
            client_name,
            client_phone,
            delivery_date: self.delivery_date.clone(),
            delivery_time: self.delivery_time.clone(),
            items: self.items.clone(),
            status: OrderStatus::Pending,
            created_date: today_string(),
            payments: self.payments.clone(),
            amount_paid: money::to_f64(money::payments_total(&self.payments)),
            discount_percent: self.discount_percent,
        })
    }

    /// Repopulate the draft from a persisted order for editing
    ///
    /// Item and payment lists are deep-copied so the draft never aliases the
    /// ledger's stored arrays. The original client record is not re-resolved;
    /// the draft carries its denormalized name/phone instead.
    pub fn load_from_order(&mut self, order: &Order) {
        self.set_editing_client(order.client_name.clone(), order.client_phone.clone());
        self.delivery_date = order.delivery_date.clone();
        self.delivery_time = order.delivery_time.clone();
        self.items = order.items.clone();
        self.payments = order.payments.clone();
        self.discount_percent = order.discount_percent;
    }
}
