//! Wait-time and delivery-delay features
//!
//! Derives, per order, the elapsed days between purchase and delivery, the
//! expected wait promised at purchase time, and how many days late the
//! delivery ran versus that estimate.

use chrono::NaiveDateTime;

use crate::data::types::OrderRecord;

/// Status value marking an order as delivered to the customer.
pub const DELIVERED_STATUS: &str = "delivered";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-order wait-time feature row
#[derive(Debug, Clone, PartialEq)]
pub struct WaitTimeFeature {
    pub order_id: String,
    /// Days between purchase and actual delivery, fractional
    pub wait_time: Option<f64>,
    /// Days between purchase and the estimated delivery date
    pub expected_wait_time: Option<f64>,
    /// Days late versus the estimate, floored at zero
    pub delay_vs_expected: Option<f64>,
    pub order_status: String,
}

/// Compute wait-time features for every order.
///
/// With `is_delivered` set (the default in the assembler), orders in any
/// other status are excluded before computation. Null timestamps propagate
/// as null features; rows are never dropped here, only at final assembly.
pub fn wait_time_features(orders: &[OrderRecord], is_delivered: bool) -> Vec<WaitTimeFeature> {
    orders
        .iter()
        .filter(|order| !is_delivered || order.order_status == DELIVERED_STATUS)
        .map(|order| {
            let wait_time = days_between(
                order.order_purchase_timestamp,
                order.order_delivered_customer_date,
            );
            let expected_wait_time = days_between(
                order.order_purchase_timestamp,
                order.order_estimated_delivery_date,
            );
            let delay_vs_expected = match (wait_time, expected_wait_time) {
                (Some(wait), Some(expected)) => Some((wait - expected).max(0.0)),
                _ => None,
            };

            WaitTimeFeature {
                order_id: order.order_id.clone(),
                wait_time,
                expected_wait_time,
                delay_vs_expected,
                order_status: order.order_status.clone(),
            }
        })
        .collect()
}

/// Elapsed days from `start` to `end`, fractional via seconds.
fn days_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<f64> {
    let (start, end) = (start?, end?);
    Some((end - start).num_seconds() as f64 / SECONDS_PER_DAY)
}
