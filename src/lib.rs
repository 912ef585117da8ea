//! # Olist Features - Per-Order Feature Engineering for E-Commerce Data
//!
//! This library turns the raw Olist e-commerce CSV datasets into one
//! denormalized per-order training table. The pipeline:
//!
//! - Dataset loading: directory scan, filename normalization, typed CSV parse
//! - Per-dimension extractors: wait time and delivery delay, review
//!   sentiment, item and seller counts, price/freight totals, and optional
//!   seller-customer great-circle distance
//! - Assembly: left-joins on the order identifier, null-row drop, fixed
//!   column order, CSV and feature-matrix export
//!
//! Malformed values (unparsable timestamps, unresolvable zip prefixes)
//! degrade to nulls and are excluded at assembly; only a missing dataset or
//! column is a hard error.

pub mod data;
pub mod error;
pub mod features;

pub use data::loader::load_datasets;
pub use data::store::Datasets;
pub use error::{Error, Result};
pub use features::geo::haversine_distance;
pub use features::training::{OrderFeatures, TrainingOptions, TrainingRow, TrainingTable};
