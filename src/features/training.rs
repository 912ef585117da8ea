//! Training-table assembly
//!
//! Joins every per-order feature table onto the wait-time table, drops
//! incomplete rows, and exposes the result with a fixed column order plus
//! CSV and feature-matrix export.

use std::collections::HashMap;
use std::io;

use ndarray::Array2;
use tracing::info;

use crate::data::store::Datasets;
use crate::features::geo::{distance_features, DistanceFeature};
use crate::features::items::{item_counts, price_and_freight, seller_counts};
use crate::features::items::{ItemCount, PriceFreight, SellerCount};
use crate::features::review::{review_features, ReviewFeature};
use crate::features::wait_time::{wait_time_features, WaitTimeFeature};

/// Flags controlling training-table assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingOptions {
    /// Restrict wait-time computation to delivered orders
    pub is_delivered: bool,
    /// Include the seller-customer distance column; rows lacking a
    /// computable distance are then dropped like any other null
    pub with_distance_seller_customer: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            is_delivered: true,
            with_distance_seller_customer: false,
        }
    }
}

/// One complete row of the training table.
///
/// Assembly drops any order with a null in any joined feature, so every
/// field here is concrete; `distance_seller_customer` is `Some` exactly
/// when the distance column was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub order_id: String,
    pub wait_time: f64,
    pub expected_wait_time: f64,
    pub delay_vs_expected: f64,
    pub order_status: String,
    pub dim_is_five_star: u8,
    pub dim_is_one_star: u8,
    pub review_score: i32,
    pub number_of_items: u32,
    pub number_of_sellers: u32,
    pub price: f64,
    pub freight_value: f64,
    pub distance_seller_customer: Option<f64>,
}

impl TrainingRow {
    /// Numeric columns in output order, for the feature matrix.
    fn numeric_values(&self, with_distance: bool) -> Vec<f64> {
        let mut values = vec![
            self.wait_time,
            self.expected_wait_time,
            self.delay_vs_expected,
            f64::from(self.dim_is_five_star),
            f64::from(self.dim_is_one_star),
            f64::from(self.review_score),
            f64::from(self.number_of_items),
            f64::from(self.number_of_sellers),
            self.price,
            self.freight_value,
        ];
        if with_distance {
            values.push(self.distance_seller_customer.unwrap_or(f64::NAN));
        }
        values
    }
}

/// Column order of the assembled table, distance column excluded
pub const BASE_COLUMNS: [&str; 12] = [
    "order_id",
    "wait_time",
    "expected_wait_time",
    "delay_vs_expected",
    "order_status",
    "dim_is_five_star",
    "dim_is_one_star",
    "review_score",
    "number_of_items",
    "number_of_sellers",
    "price",
    "freight_value",
];

/// Name of the optional trailing distance column
pub const DISTANCE_COLUMN: &str = "distance_seller_customer";

/// Numeric columns of `BASE_COLUMNS`, in the same relative order
const NUMERIC_COLUMNS: [&str; 10] = [
    "wait_time",
    "expected_wait_time",
    "delay_vs_expected",
    "dim_is_five_star",
    "dim_is_one_star",
    "review_score",
    "number_of_items",
    "number_of_sellers",
    "price",
    "freight_value",
];

/// Assembled, null-free training table
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingTable {
    rows: Vec<TrainingRow>,
    with_distance: bool,
}

impl TrainingTable {
    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut columns = BASE_COLUMNS.to_vec();
        if self.with_distance {
            columns.push(DISTANCE_COLUMN);
        }
        columns
    }

    /// Write the table as CSV with the fixed column order.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.column_names())?;

        for row in &self.rows {
            let mut record = vec![
                row.order_id.clone(),
                row.wait_time.to_string(),
                row.expected_wait_time.to_string(),
                row.delay_vs_expected.to_string(),
                row.order_status.clone(),
                row.dim_is_five_star.to_string(),
                row.dim_is_one_star.to_string(),
                row.review_score.to_string(),
                row.number_of_items.to_string(),
                row.number_of_sellers.to_string(),
                row.price.to_string(),
                row.freight_value.to_string(),
            ];
            if self.with_distance {
                // Guaranteed present by assembly when the column is requested
                record.push(
                    row.distance_seller_customer
                        .map(|km| km.to_string())
                        .unwrap_or_default(),
                );
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Numeric columns as a samples-by-features matrix with column names,
    /// ready for a downstream model.
    pub fn feature_matrix(&self) -> (Array2<f64>, Vec<&'static str>) {
        let mut names = NUMERIC_COLUMNS.to_vec();
        if self.with_distance {
            names.push(DISTANCE_COLUMN);
        }

        let mut matrix = Array2::zeros((self.rows.len(), names.len()));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, value) in row.numeric_values(self.with_distance).into_iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }

        (matrix, names)
    }
}

/// Feature pipeline over a loaded dataset snapshot.
///
/// Borrows the snapshot and re-derives every feature table from the raw
/// rows on each call.
pub struct OrderFeatures<'a> {
    data: &'a Datasets,
}

impl<'a> OrderFeatures<'a> {
    pub fn new(data: &'a Datasets) -> Self {
        Self { data }
    }

    /// Wait-time, expected wait-time, and delay features per order.
    pub fn wait_time(&self, is_delivered: bool) -> Vec<WaitTimeFeature> {
        wait_time_features(&self.data.orders, is_delivered)
    }

    /// Five-star/one-star indicators and the raw review score per order.
    pub fn review_scores(&self) -> Vec<ReviewFeature> {
        review_features(&self.data.order_reviews)
    }

    /// Item-line count per order.
    pub fn item_counts(&self) -> Vec<ItemCount> {
        item_counts(&self.data.order_items)
    }

    /// Distinct-seller count per order.
    pub fn seller_counts(&self) -> Vec<SellerCount> {
        seller_counts(&self.data.order_items)
    }

    /// Price and freight totals per order.
    pub fn price_and_freight(&self) -> Vec<PriceFreight> {
        price_and_freight(&self.data.order_items)
    }

    /// Mean seller-customer distance per order.
    pub fn distance_seller_customer(&self) -> Vec<DistanceFeature> {
        distance_features(self.data)
    }

    /// Join every feature onto the wait-time table and drop incomplete rows.
    ///
    /// Output rows keep the wait-time table's order, so repeated calls with
    /// the same snapshot and options produce identical tables.
    pub fn training_table(&self, options: TrainingOptions) -> TrainingTable {
        let wait = self.wait_time(options.is_delivered);

        let reviews = self.review_scores();
        let review_ix: HashMap<&str, &ReviewFeature> =
            reviews.iter().map(|r| (r.order_id.as_str(), r)).collect();

        let items = self.item_counts();
        let item_ix: HashMap<&str, u32> = items
            .iter()
            .map(|c| (c.order_id.as_str(), c.number_of_items))
            .collect();

        let sellers = self.seller_counts();
        let seller_ix: HashMap<&str, u32> = sellers
            .iter()
            .map(|c| (c.order_id.as_str(), c.number_of_sellers))
            .collect();

        let totals = self.price_and_freight();
        let totals_ix: HashMap<&str, (f64, f64)> = totals
            .iter()
            .map(|t| (t.order_id.as_str(), (t.price, t.freight_value)))
            .collect();

        let distances = options
            .with_distance_seller_customer
            .then(|| self.distance_seller_customer());
        let distance_ix: HashMap<&str, Option<f64>> = distances
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|d| (d.order_id.as_str(), d.distance_seller_customer))
            .collect();

        let mut rows = Vec::with_capacity(wait.len());
        for feature in &wait {
            let order_id = feature.order_id.as_str();

            let (Some(wait_time), Some(expected_wait_time), Some(delay_vs_expected)) =
                (feature.wait_time, feature.expected_wait_time, feature.delay_vs_expected)
            else {
                continue;
            };
            let Some(review) = review_ix.get(order_id) else {
                continue;
            };
            let Some(number_of_items) = item_ix.get(order_id).copied() else {
                continue;
            };
            let Some(number_of_sellers) = seller_ix.get(order_id).copied() else {
                continue;
            };
            let Some((price, freight_value)) = totals_ix.get(order_id).copied() else {
                continue;
            };

            let distance_seller_customer = if options.with_distance_seller_customer {
                match distance_ix.get(order_id).copied().flatten() {
                    Some(km) => Some(km),
                    None => continue,
                }
            } else {
                None
            };

            rows.push(TrainingRow {
                order_id: feature.order_id.clone(),
                wait_time,
                expected_wait_time,
                delay_vs_expected,
                order_status: feature.order_status.clone(),
                dim_is_five_star: review.dim_is_five_star,
                dim_is_one_star: review.dim_is_one_star,
                review_score: review.review_score,
                number_of_items,
                number_of_sellers,
                price,
                freight_value,
                distance_seller_customer,
            });
        }

        info!(
            "assembled training table: {} of {} wait-time rows kept after dropping nulls",
            rows.len(),
            wait.len()
        );

        TrainingTable {
            rows,
            with_distance: options.with_distance_seller_customer,
        }
    }
}
