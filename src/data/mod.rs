//! Raw Olist tables: typed rows, in-memory snapshot, CSV loading

pub mod loader;
pub mod store;
pub mod types;

pub use loader::load_datasets;
pub use store::{Datasets, DATASET_NAMES};
pub use types::{Customer, GeolocationRow, OrderItem, OrderRecord, Review, Seller};
