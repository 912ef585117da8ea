//! Geographic features
//!
//! Great-circle distance between each order's sellers and its customer:
//! - haversine distance on a spherical Earth
//! - `GeoSummary`: mean coordinates per zip-code prefix
//! - the order/customer/seller join chain and the per-order distance mean

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::data::store::Datasets;
use crate::data::types::GeolocationRow;

/// Earth mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two (lng, lat) points given
/// in degrees, via the haversine formula.
pub fn haversine_distance(lng1: f64, lat1: f64, lng2: f64, lat2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Mean coordinates per zip-code prefix.
///
/// Raw geolocation data carries many coordinate rows per prefix; collapsing
/// them to one mean (lat, lng) trades precision for a stable one-to-one
/// lookup.
#[derive(Debug, Clone, Default)]
pub struct GeoSummary {
    coords: HashMap<u32, (f64, f64)>,
}

impl GeoSummary {
    /// Build the summary by averaging all rows sharing a prefix.
    pub fn from_rows(rows: &[GeolocationRow]) -> Self {
        let mut acc: HashMap<u32, (f64, f64, u32)> = HashMap::new();
        for row in rows {
            let entry = acc
                .entry(row.geolocation_zip_code_prefix)
                .or_insert((0.0, 0.0, 0));
            entry.0 += row.geolocation_lat;
            entry.1 += row.geolocation_lng;
            entry.2 += 1;
        }

        let coords = acc
            .into_iter()
            .map(|(zip, (lat, lng, n))| (zip, (lat / n as f64, lng / n as f64)))
            .collect();

        Self { coords }
    }

    /// Mean (lat, lng) for a prefix, if the raw data covered it.
    pub fn lookup(&self, zip_prefix: u32) -> Option<(f64, f64)> {
        self.coords.get(&zip_prefix).copied()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Mean seller-customer distance per order, in kilometers
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceFeature {
    pub order_id: String,
    /// Null when no item line of the order resolved to a distance
    pub distance_seller_customer: Option<f64>,
}

/// Seller-customer distance for every item line, lazily.
///
/// Each item line pairs its seller's zip prefix with the zip prefix of the
/// order's customer; both resolve to mean coordinates through `geo`. A line
/// whose endpoints cannot both be resolved yields a null distance. Rows are
/// independent, so the iterator can be consumed in any order or in parallel.
pub fn item_line_distances<'a>(
    data: &'a Datasets,
    geo: &'a GeoSummary,
) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
    let customer_zip: HashMap<&str, u32> = data
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.customer_zip_code_prefix))
        .collect();

    let customer_zip_by_order: HashMap<&str, u32> = data
        .orders
        .iter()
        .filter_map(|order| {
            customer_zip
                .get(order.customer_id.as_str())
                .map(|zip| (order.order_id.as_str(), *zip))
        })
        .collect();

    let seller_zip: HashMap<&str, u32> = data
        .sellers
        .iter()
        .map(|s| (s.seller_id.as_str(), s.seller_zip_code_prefix))
        .collect();

    data.order_items.iter().map(move |item| {
        let seller = seller_zip
            .get(item.seller_id.as_str())
            .and_then(|zip| geo.lookup(*zip));
        let customer = customer_zip_by_order
            .get(item.order_id.as_str())
            .and_then(|zip| geo.lookup(*zip));

        let distance = match (seller, customer) {
            (Some((s_lat, s_lng)), Some((c_lat, c_lng))) => {
                Some(haversine_distance(s_lng, s_lat, c_lng, c_lat))
            }
            _ => None,
        };

        (item.order_id.as_str(), distance)
    })
}

/// Average the per-item-line distances into one value per order.
///
/// Unresolved lines are skipped by the mean; an order whose lines are all
/// unresolved keeps a null distance rather than disappearing.
pub fn distance_features(data: &Datasets) -> Vec<DistanceFeature> {
    let geo = GeoSummary::from_rows(&data.geolocation);

    // (distance sum, resolved lines, total lines) per order
    let mut acc: BTreeMap<&str, (f64, u32, u32)> = BTreeMap::new();
    for (order_id, distance) in item_line_distances(data, &geo) {
        let entry = acc.entry(order_id).or_insert((0.0, 0, 0));
        entry.2 += 1;
        if let Some(km) = distance {
            entry.0 += km;
            entry.1 += 1;
        }
    }

    let unresolved: u32 = acc.values().map(|(_, resolved, total)| total - resolved).sum();
    if unresolved > 0 {
        debug!("{} item lines had no resolvable coordinates", unresolved);
    }

    acc.into_iter()
        .map(|(order_id, (sum, resolved, _))| DistanceFeature {
            order_id: order_id.to_string(),
            distance_seller_customer: (resolved > 0).then(|| sum / f64::from(resolved)),
        })
        .collect()
}
