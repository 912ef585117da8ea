//! Typed rows for the raw Olist tables
//!
//! One struct per CSV dataset, with field names matching the CSV headers so
//! `csv::Reader::deserialize` maps columns directly. Only the columns the
//! feature extractors consume are declared; everything else in the files is
//! ignored.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// One row of the orders table
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    /// Lifecycle status, e.g. "delivered", "shipped", "canceled"
    pub order_status: String,
    #[serde(deserialize_with = "de_opt_naive_datetime")]
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de_opt_naive_datetime")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de_opt_naive_datetime")]
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
}

/// One item line of the order_items table
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub seller_id: String,
    pub price: f64,
    pub freight_value: f64,
}

/// One row of the order_reviews table
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub order_id: String,
    /// Star rating, 1 to 5 in well-formed data
    pub review_score: i32,
}

/// One row of the customers table
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub customer_zip_code_prefix: u32,
}

/// One row of the sellers table
#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub seller_id: String,
    pub seller_zip_code_prefix: u32,
}

/// One row of the geolocation table
///
/// Many rows can share a zip-code prefix; the pipeline collapses them to a
/// mean coordinate per prefix before any distance computation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationRow {
    pub geolocation_zip_code_prefix: u32,
    pub geolocation_lat: f64,
    pub geolocation_lng: f64,
}

/// Lenient timestamp deserializer: empty or unparsable values become `None`
/// instead of failing the row.
fn de_opt_naive_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_naive_datetime))
}

fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
