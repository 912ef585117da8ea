//! Dataset discovery and CSV loading
//!
//! Scans a data directory for the Olist CSV exports, normalizes their file
//! names to dataset keys, and parses each required table into typed rows.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::data::store::Datasets;
use crate::error::{Error, Result};

/// Load all required datasets from a directory of CSV files.
///
/// File names are normalized to dataset keys, so both `orders.csv` and the
/// upstream `olist_orders_dataset.csv` naming resolve to `orders`. Files
/// that do not map to a required dataset are ignored. A missing required
/// dataset fails fast rather than surfacing later as an empty join.
pub fn load_datasets(dir: &Path) -> Result<Datasets> {
    if !dir.is_dir() {
        return Err(Error::DataDirNotFound(dir.to_path_buf()));
    }

    let mut files: HashMap<String, PathBuf> = HashMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let key = dataset_key(name);
        debug!("discovered {} as dataset {:?}", name, key);
        files.insert(key, path);
    }

    let datasets = Datasets {
        orders: read_table(required(&files, "orders")?)?,
        order_items: read_table(required(&files, "order_items")?)?,
        order_reviews: read_table(required(&files, "order_reviews")?)?,
        customers: read_table(required(&files, "customers")?)?,
        sellers: read_table(required(&files, "sellers")?)?,
        geolocation: read_table(required(&files, "geolocation")?)?,
    };

    info!(
        "loaded {} orders, {} item lines, {} reviews, {} customers, {} sellers, {} geolocation rows",
        datasets.orders.len(),
        datasets.order_items.len(),
        datasets.order_reviews.len(),
        datasets.customers.len(),
        datasets.sellers.len(),
        datasets.geolocation.len(),
    );

    Ok(datasets)
}

/// Normalize a CSV file name to its dataset key:
/// `olist_orders_dataset.csv` becomes `orders`.
fn dataset_key(file_name: &str) -> String {
    file_name
        .trim_end_matches(".csv")
        .trim_end_matches("_dataset")
        .trim_start_matches("olist_")
        .to_string()
}

fn required<'a>(files: &'a HashMap<String, PathBuf>, name: &'static str) -> Result<&'a Path> {
    files
        .get(name)
        .map(PathBuf::as_path)
        .ok_or(Error::MissingDataset(name))
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| Error::Csv {
        file: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| Error::Csv {
            file: path.to_path_buf(),
            source,
        })?);
    }
    Ok(rows)
}
