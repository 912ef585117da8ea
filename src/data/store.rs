//! In-memory snapshot of the raw Olist tables
//!
//! The feature extractors never touch the filesystem; they borrow a
//! `Datasets` value that the loader (or a test fixture) built up front.

use crate::data::types::{Customer, GeolocationRow, OrderItem, OrderRecord, Review, Seller};

/// Dataset names the pipeline requires, in summary-display order.
pub const DATASET_NAMES: [&str; 6] = [
    "orders",
    "order_items",
    "order_reviews",
    "customers",
    "sellers",
    "geolocation",
];

/// Immutable snapshot of all raw tables.
///
/// Every derived feature table is recomputed from these rows on each call;
/// nothing here is mutated or cached after construction.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub orders: Vec<OrderRecord>,
    pub order_items: Vec<OrderItem>,
    pub order_reviews: Vec<Review>,
    pub customers: Vec<Customer>,
    pub sellers: Vec<Seller>,
    pub geolocation: Vec<GeolocationRow>,
}

impl Datasets {
    /// Row counts per table, in `DATASET_NAMES` order.
    pub fn row_counts(&self) -> [(&'static str, usize); 6] {
        [
            ("orders", self.orders.len()),
            ("order_items", self.order_items.len()),
            ("order_reviews", self.order_reviews.len()),
            ("customers", self.customers.len()),
            ("sellers", self.sellers.len()),
            ("geolocation", self.geolocation.len()),
        ]
    }
}
