//! Review-score features
//!
//! Maps the 1-5 star rating to two binary sentiment indicators.

use crate::data::types::Review;

/// Per-order review feature row
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFeature {
    pub order_id: String,
    /// 1 when the review is five stars
    pub dim_is_five_star: u8,
    /// 1 when the review is one star
    pub dim_is_one_star: u8,
    pub review_score: i32,
}

/// Derive the indicator columns for every review.
///
/// Scores outside 1-5 are not normalized; they simply set neither indicator.
pub fn review_features(reviews: &[Review]) -> Vec<ReviewFeature> {
    reviews
        .iter()
        .map(|review| ReviewFeature {
            order_id: review.order_id.clone(),
            dim_is_five_star: (review.review_score == 5) as u8,
            dim_is_one_star: (review.review_score == 1) as u8,
            review_score: review.review_score,
        })
        .collect()
}
