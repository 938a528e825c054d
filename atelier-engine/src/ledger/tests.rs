use super::*;
use crate::draft::DraftOrder;
use shared::models::{Client, GarmentType, Service};
use shared::order::PaymentMethod;

fn ledger() -> OrderLedger {
    let storage = Storage::open_in_memory().unwrap();
    let aggregator = Arc::new(FinancialAggregator::new(storage.clone()));
    let ledger = OrderLedger::new(storage, aggregator);
    ledger.load().unwrap();
    ledger
}

fn maria() -> Client {
    Client {
        uuid: "client-maria".to_string(),
        name: "MARIA".to_string(),
        phone: Some("(11) 98888-7777".to_string()),
    }
}

fn garment(name: &str) -> GarmentType {
    GarmentType {
        uuid: format!("gt-{}", name.to_lowercase()),
        name: name.to_string(),
    }
}

fn service(name: &str, default_price: f64) -> Service {
    Service {
        uuid: format!("svc-{}", name.to_lowercase()),
        name: name.to_string(),
        default_price,
    }
}

/// Two garments, a discount and a partial payment, walked through to
/// completion.
fn maria_order(ledger: &OrderLedger) -> String {
    let mut draft = DraftOrder::new();
    draft.set_client(maria());
    draft.delivery_date = "2026-09-05".to_string();

    let wash = service("Wash", 10.0);
    let hem = service("Hem", 15.0);

    let g1 = draft.add_garment(&garment("Dress"));
    draft.add_service_to_garment(&g1, &wash, 2, wash.default_price);

    let g2 = draft.add_garment(&garment("Trousers"));
    draft.add_service_to_garment(&g2, &hem, 1, hem.default_price);

    draft.set_discount(10.0);
    draft.add_payment(PaymentMethod::Pix, 20.0);

    let totals = draft.totals();
    assert_eq!(totals.subtotal, 35.0);
    assert_eq!(totals.total, 31.5);
    assert_eq!(totals.remaining, 11.5);

    let order = draft.to_order().unwrap();
    ledger.add(order).unwrap()
}

#[test]
fn add_assigns_identifier_and_starts_pending() {
    let ledger = ledger();
    let id = maria_order(&ledger);

    assert!(!id.is_empty());
    let stored = ledger.get(&id).unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.client_name, "MARIA");
    assert_eq!(stored.amount_paid, 20.0);
}

#[test]
fn completion_moves_counters_exactly_once() {
    let ledger = ledger();
    let id = maria_order(&ledger);

    // Settle the remaining balance, then complete
    let mut payments = ledger.get(&id).unwrap().payments;
    payments.push(PaymentRecord {
        method: PaymentMethod::Cash,
        amount: 11.5,
        received_at: 0,
    });
    ledger.register_payment(&id, payments, 31.5).unwrap();

    ledger.set_status(&id, OrderStatus::Completed).unwrap();

    let metrics = ledger.current_metrics().unwrap();
    assert_eq!(metrics.completed_count, 1);
    assert_eq!(metrics.invoiced_total, 31.5);
    assert_eq!(metrics.revenue_total, 31.5);
    assert_eq!(metrics.pending_total, 0.0);

    // Re-applying the same status is a no-op for the counters
    ledger.set_status(&id, OrderStatus::Completed).unwrap();
    let metrics = ledger.current_metrics().unwrap();
    assert_eq!(metrics.completed_count, 1);
    assert_eq!(metrics.invoiced_total, 31.5);
}

#[test]
fn cancellation_counts_once_and_drops_pending_balance() {
    let ledger = ledger();
    let id = maria_order(&ledger);

    ledger.set_status(&id, OrderStatus::Cancelled).unwrap();

    let metrics = ledger.current_metrics().unwrap();
    assert_eq!(metrics.cancelled_count, 1);
    assert_eq!(metrics.completed_count, 0);
    // Collected money stays in revenue; the unpaid remainder is written off
    assert_eq!(metrics.revenue_total, 20.0);
    assert_eq!(metrics.pending_total, 0.0);

    ledger.set_status(&id, OrderStatus::Cancelled).unwrap();
    assert_eq!(ledger.current_metrics().unwrap().cancelled_count, 1);
}

#[test]
fn revision_recomputes_amount_paid_but_not_counters() {
    let ledger = ledger();
    let id = maria_order(&ledger);
    ledger.set_status(&id, OrderStatus::Completed).unwrap();

    // Edit the completed order: drop the discount, replace the payments
    let order = ledger.get(&id).unwrap();
    let new_payments = vec![PaymentRecord {
        method: PaymentMethod::Debit,
        amount: 12.25,
        received_at: 0,
    }];
    ledger
        .revise_items_and_payments(&id, order.items, new_payments, 0.0)
        .unwrap();

    let revised = ledger.get(&id).unwrap();
    assert_eq!(revised.amount_paid, 12.25);
    assert_eq!(revised.discount_percent, 0.0);
    assert_eq!(revised.status, OrderStatus::Completed);

    // invoiced_total still reflects the value at completion time
    let metrics = ledger.current_metrics().unwrap();
    assert_eq!(metrics.completed_count, 1);
    assert_eq!(metrics.invoiced_total, 31.5);
    assert_eq!(metrics.revenue_total, 12.25);
}

#[test]
fn unknown_order_mutations_are_ignored() {
    let ledger = ledger();
    maria_order(&ledger);

    ledger.set_status("no-such-order", OrderStatus::Completed).unwrap();
    ledger
        .register_payment("no-such-order", Vec::new(), 99.0)
        .unwrap();

    let metrics = ledger.current_metrics().unwrap();
    assert_eq!(metrics.completed_count, 0);
    assert_eq!(metrics.revenue_total, 20.0);
}

#[test]
fn delivery_date_query_sorts_by_time_with_untimed_first() {
    let ledger = ledger();

    for (date, time) in [
        ("2026-09-05", "14:00"),
        ("2026-09-05", "09:30"),
        ("2026-09-05", ""),
        ("2026-09-06", "08:00"),
    ] {
        let mut draft = DraftOrder::new();
        draft.set_client(maria());
        draft.delivery_date = date.to_string();
        draft.delivery_time = time.to_string();
        let g = draft.add_garment(&garment("Dress"));
        draft.add_service_to_garment(&g, &service("Wash", 10.0), 1, 10.0);
        ledger.add(draft.to_order().unwrap()).unwrap();
    }

    let due = ledger.orders_for_delivery_date("2026-09-05");
    let times: Vec<&str> = due.iter().map(|o| o.delivery_time.as_str()).collect();
    assert_eq!(times, ["", "09:30", "14:00"]);
}

#[test]
fn cache_survives_reload() {
    let storage = Storage::open_in_memory().unwrap();
    let aggregator = Arc::new(FinancialAggregator::new(storage.clone()));
    let ledger = OrderLedger::new(storage.clone(), aggregator);
    ledger.load().unwrap();
    let id = maria_order(&ledger);

    // A second ledger over the same database sees the persisted order
    let aggregator = Arc::new(FinancialAggregator::new(storage.clone()));
    let reopened = OrderLedger::new(storage, aggregator);
    reopened.load().unwrap();
    assert_eq!(reopened.orders().len(), 1);
    assert!(reopened.get(&id).is_some());
}
