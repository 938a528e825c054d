//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values are stored and serialized as `f64`, but every calculation
//! runs in `Decimal` and converts back through [`to_f64`] with 2-decimal
//! half-up rounding. The `validate_*` functions are the bounds checks the
//! draft builder runs before accepting numeric input.

use rust_decimal::prelude::*;
use shared::order::{GarmentLineItem, Order, OrderTotals, PaymentRecord};
use thiserror::Error;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per service line
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Input validation failures, surfaced to the user as rejected operations
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} exceeds maximum allowed ({max}), got {value}")]
    TooLarge {
        field: &'static str,
        max: f64,
        value: f64,
    },

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i32),

    #[error("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {0}")]
    QuantityTooLarge(i32),

    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(f64),
}

#[inline]
fn require_finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    Ok(())
}

/// Validate a service line before attaching it to a garment
pub fn validate_service_line(quantity: i32, unit_price: f64) -> Result<(), ValidationError> {
    require_finite(unit_price, "unit price")?;
    if unit_price < 0.0 {
        return Err(ValidationError::Negative {
            field: "unit price",
            value: unit_price,
        });
    }
    if unit_price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: "unit price",
            max: MAX_PRICE,
            value: unit_price,
        });
    }
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::QuantityTooLarge(quantity));
    }
    Ok(())
}

/// Validate a payment amount before recording it
pub fn validate_payment_amount(amount: f64) -> Result<(), ValidationError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "payment amount",
            max: MAX_PAYMENT_AMOUNT,
            value: amount,
        });
    }
    Ok(())
}

/// Validate a discount percentage (>= 0; no upper bound is enforced)
pub fn validate_discount(percent: f64) -> Result<(), ValidationError> {
    require_finite(percent, "discount percent")?;
    if percent < 0.0 {
        return Err(ValidationError::Negative {
            field: "discount percent",
            value: percent,
        });
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum over garments over services of quantity x unit price
pub fn items_subtotal(items: &[GarmentLineItem]) -> Decimal {
    items
        .iter()
        .flat_map(|garment| garment.services.iter())
        .map(|line| to_decimal(line.unit_price) * Decimal::from(line.quantity))
        .sum()
}

/// Apply a discount percentage to a subtotal
pub fn net_total(subtotal: Decimal, discount_percent: f64) -> Decimal {
    subtotal * (Decimal::ONE - to_decimal(discount_percent) / Decimal::ONE_HUNDRED)
}

/// Sum of payment amounts
pub fn payments_total(payments: &[PaymentRecord]) -> Decimal {
    payments.iter().map(|p| to_decimal(p.amount)).sum()
}

/// Derived totals for a draft or order: subtotal, discounted total, paid,
/// and remaining clamped at zero
pub fn compute_totals(
    items: &[GarmentLineItem],
    payments: &[PaymentRecord],
    discount_percent: f64,
) -> OrderTotals {
    let subtotal = items_subtotal(items);
    let total = net_total(subtotal, discount_percent);
    let paid = payments_total(payments);
    let remaining = (total - paid).max(Decimal::ZERO);

    OrderTotals {
        subtotal: to_f64(subtotal),
        total: to_f64(total),
        total_paid: to_f64(paid),
        remaining: to_f64(remaining),
    }
}

/// Net total of a persisted order (subtotal after its discount)
pub fn order_net_total(order: &Order) -> f64 {
    to_f64(net_total(
        items_subtotal(&order.items),
        order.discount_percent,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{PaymentMethod, ServiceLine};

    fn garment_with_lines(lines: Vec<(i32, f64)>) -> GarmentLineItem {
        GarmentLineItem {
            uuid: "g1".to_string(),
            garment_type_id: "gt1".to_string(),
            garment_name: "Shirt".to_string(),
            line_number: 1,
            services: lines
                .into_iter()
                .enumerate()
                .map(|(i, (quantity, unit_price))| ServiceLine {
                    uuid: format!("s{i}"),
                    service_id: format!("svc{i}"),
                    name: "Service".to_string(),
                    quantity,
                    unit_price,
                })
                .collect(),
        }
    }

    fn payment(amount: f64) -> PaymentRecord {
        PaymentRecord {
            method: PaymentMethod::Cash,
            amount,
            received_at: 0,
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn subtotal_spans_garments_and_services() {
        let items = vec![
            garment_with_lines(vec![(2, 10.0), (1, 5.5)]),
            garment_with_lines(vec![(3, 4.0)]),
        ];
        assert_eq!(to_f64(items_subtotal(&items)), 37.5);
    }

    #[test]
    fn totals_apply_discount_and_clamp_remaining() {
        let items = vec![garment_with_lines(vec![(2, 10.0)])]; // 20.00
        let payments = vec![payment(25.0)];

        let totals = compute_totals(&items, &payments, 10.0);
        assert_eq!(totals.subtotal, 20.0);
        assert_eq!(totals.total, 18.0);
        assert_eq!(totals.total_paid, 25.0);
        // Overpaid: remaining clamps at zero, never negative
        assert_eq!(totals.remaining, 0.0);
    }

    #[test]
    fn awkward_discount_percent_rounds_half_up() {
        let items = vec![garment_with_lines(vec![(1, 100.0)])];
        let totals = compute_totals(&items, &[], 33.33);
        assert_eq!(totals.total, 66.67);
    }

    #[test]
    fn validate_rejects_bad_input() {
        assert!(validate_service_line(0, 10.0).is_err());
        assert!(validate_service_line(-2, 10.0).is_err());
        assert!(validate_service_line(1, -0.01).is_err());
        assert!(validate_service_line(1, f64::NAN).is_err());
        assert!(validate_service_line(1, 10.0).is_ok());

        assert!(validate_payment_amount(0.0).is_err());
        assert!(validate_payment_amount(10.0).is_ok());

        assert!(validate_discount(-1.0).is_err());
        // No upper bound on discounts; the caller guards
        assert!(validate_discount(150.0).is_ok());
    }
}
