//! Feature extraction modules

pub mod geo;
pub mod items;
pub mod review;
pub mod training;
pub mod wait_time;

pub use geo::{haversine_distance, DistanceFeature, GeoSummary};
pub use items::{ItemCount, PriceFreight, SellerCount};
pub use review::ReviewFeature;
pub use training::{OrderFeatures, TrainingOptions, TrainingRow, TrainingTable};
pub use wait_time::WaitTimeFeature;
