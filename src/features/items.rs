//! Per-order aggregates over the order_items table
//!
//! Item counts, distinct-seller counts, and price/freight totals. Orders
//! without item lines are absent from these outputs; the assembler's final
//! null drop excludes them from the training table.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::types::OrderItem;

/// Number of item lines per order
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCount {
    pub order_id: String,
    pub number_of_items: u32,
}

/// Number of distinct sellers per order
#[derive(Debug, Clone, PartialEq)]
pub struct SellerCount {
    pub order_id: String,
    pub number_of_sellers: u32,
}

/// Total spend per order, split into price and freight
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFreight {
    pub order_id: String,
    pub price: f64,
    pub freight_value: f64,
}

/// Count item lines per order.
pub fn item_counts(items: &[OrderItem]) -> Vec<ItemCount> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for item in items {
        *counts.entry(item.order_id.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(order_id, number_of_items)| ItemCount {
            order_id: order_id.to_string(),
            number_of_items,
        })
        .collect()
}

/// Count distinct sellers per order.
pub fn seller_counts(items: &[OrderItem]) -> Vec<SellerCount> {
    let mut sellers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for item in items {
        sellers
            .entry(item.order_id.as_str())
            .or_default()
            .insert(item.seller_id.as_str());
    }

    sellers
        .into_iter()
        .map(|(order_id, distinct)| SellerCount {
            order_id: order_id.to_string(),
            number_of_sellers: distinct.len() as u32,
        })
        .collect()
}

/// Sum price and freight_value per order across its item lines.
pub fn price_and_freight(items: &[OrderItem]) -> Vec<PriceFreight> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for item in items {
        let entry = totals.entry(item.order_id.as_str()).or_insert((0.0, 0.0));
        entry.0 += item.price;
        entry.1 += item.freight_value;
    }

    totals
        .into_iter()
        .map(|(order_id, (price, freight_value))| PriceFreight {
            order_id: order_id.to_string(),
            price,
            freight_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(order_id: &str, seller_id: &str, price: f64, freight: f64) -> OrderItem {
        OrderItem {
            order_id: order_id.to_string(),
            seller_id: seller_id.to_string(),
            price,
            freight_value: freight,
        }
    }

    fn fixture() -> Vec<OrderItem> {
        vec![
            item("o1", "s1", 50.0, 10.0),
            item("o1", "s2", 30.0, 5.0),
            item("o2", "s1", 20.0, 4.0),
            item("o2", "s1", 20.0, 4.0),
            item("o2", "s1", 20.0, 4.0),
        ]
    }

    #[test]
    fn test_item_counts() {
        let counts = item_counts(&fixture());

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].order_id, "o1");
        assert_eq!(counts[0].number_of_items, 2);
        assert_eq!(counts[1].number_of_items, 3);
    }

    #[test]
    fn test_seller_counts_are_distinct() {
        let counts = seller_counts(&fixture());

        assert_eq!(counts[0].number_of_sellers, 2);
        // Three lines, one seller
        assert_eq!(counts[1].number_of_sellers, 1);
    }

    #[test]
    fn test_sellers_never_exceed_items() {
        let items = fixture();
        let item_by_order: BTreeMap<_, _> = item_counts(&items)
            .into_iter()
            .map(|c| (c.order_id, c.number_of_items))
            .collect();

        for sellers in seller_counts(&items) {
            assert!(sellers.number_of_sellers <= item_by_order[&sellers.order_id]);
        }
    }

    #[test]
    fn test_price_and_freight_sums() {
        let totals = price_and_freight(&fixture());

        assert!((totals[0].price - 80.0).abs() < 1e-10);
        assert!((totals[0].freight_value - 15.0).abs() < 1e-10);
        // N identical lines sum to N times the line values
        assert!((totals[1].price - 60.0).abs() < 1e-10);
        assert!((totals[1].freight_value - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_item_lines_means_no_rows() {
        assert!(item_counts(&[]).is_empty());
        assert!(seller_counts(&[]).is_empty());
        assert!(price_and_freight(&[]).is_empty());
    }
}
