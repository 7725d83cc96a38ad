use std::collections::HashMap;

use crate::models::{AnalysisResult, Order};
use super::errors::OrderError;

// ============================================================================
// Per Item Type Aggregation
// ============================================================================

/// Running sums for one item type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAccumulator {
    pub count: u64,
    /// Wider than a single quantity so any number of i64 quantities fits
    pub total_quantity: i128,
    /// Σ(price_per_item × quantity)
    pub total_revenue: f64,
}

impl ItemAccumulator {
    pub fn add(&mut self, order: &Order) {
        self.count += 1;
        self.total_quantity += i128::from(order.quantity);
        self.total_revenue += order.price_per_item * order.quantity as f64;
    }

    pub fn average_quantity(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_quantity as f64 / self.count as f64
    }

    /// Quantity-weighted average price. A group whose quantities sum to zero
    /// has no meaningful weighting and reports 0.0.
    pub fn average_price(&self) -> f64 {
        if self.total_quantity == 0 {
            return 0.0;
        }
        self.total_revenue / self.total_quantity as f64
    }
}

/// Group orders by item type, keeping the order in which each item type was
/// first seen.
pub fn group_by_item_type(orders: &[Order]) -> Vec<(String, ItemAccumulator)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, ItemAccumulator)> = Vec::new();

    for order in orders {
        let slot = *index.entry(order.item_type.as_str()).or_insert_with(|| {
            groups.push((order.item_type.clone(), ItemAccumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(order);
    }

    groups
}

pub fn analyze(orders: &[Order]) -> Result<Vec<AnalysisResult>, OrderError> {
    if orders.is_empty() {
        return Err(OrderError::NotFound);
    }

    group_by_item_type(orders)
        .into_iter()
        .map(|(item_type, acc)| {
            let average_quantity = acc.average_quantity();
            let average_price = acc.average_price();
            // JSON has no NaN or infinity
            if !average_quantity.is_finite() || !average_price.is_finite() {
                return Err(OrderError::NonFiniteAggregate(item_type));
            }
            Ok(AnalysisResult {
                item_type,
                average_quantity,
                average_price,
            })
        })
        .collect()
}
