//! Order types
//!
//! Line items, payments, statuses and the persisted order snapshot.

pub mod snapshot;
pub mod types;

pub use snapshot::Order;
pub use types::{
    DraftClient, GarmentLineItem, OrderStatus, OrderTotals, PaymentMethod, PaymentRecord,
    ServiceLine,
};
