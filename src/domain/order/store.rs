use std::collections::HashSet;

use crate::models::{AnalysisResult, Order};
use super::analysis::analyze;
use super::errors::OrderError;

// ============================================================================
// Order Store - In-memory, insertion ordered, unique by id
// ============================================================================
//
// Not synchronized on its own. The order actor owns the only instance and
// serializes every access through its mailbox.
//
// ============================================================================

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
    ids: HashSet<i64>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order. Fails without touching the store when the id is taken.
    pub fn create(&mut self, order: Order) -> Result<Order, OrderError> {
        if self.ids.contains(&order.id) {
            return Err(OrderError::DuplicateKey(order.id));
        }

        self.ids.insert(order.id);
        self.orders.push(order.clone());
        Ok(order)
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn analyze(&self) -> Result<Vec<AnalysisResult>, OrderError> {
        analyze(&self.orders)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, item_type: &str, quantity: i64, price: f64) -> Order {
        Order {
            id,
            item_type: item_type.to_string(),
            quantity,
            price_per_item: price,
        }
    }

    #[test]
    fn test_create_returns_order_unchanged() {
        let mut store = OrderStore::new();
        let created = store.create(order(1, "A1", 10, 250.0)).unwrap();

        assert_eq!(created, order(1, "A1", 10, 250.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected_and_store_unchanged() {
        let mut store = OrderStore::new();
        store.create(order(1, "A1", 10, 250.0)).unwrap();

        let result = store.create(order(1, "B2", 99, 1.0));

        assert_eq!(result, Err(OrderError::DuplicateKey(1)));
        assert_eq!(store.list(), &[order(1, "A1", 10, 250.0)]);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = OrderStore::new();
        for id in [3, 1, 2] {
            store.create(order(id, "A", 1, 1.0)).unwrap();
        }

        let ids: Vec<i64> = store.list().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_store_lists_but_does_not_analyze() {
        let store = OrderStore::new();

        assert!(store.list().is_empty());
        assert!(store.is_empty());
        assert_eq!(store.analyze(), Err(OrderError::NotFound));
    }

    #[test]
    fn test_analyze_over_store() {
        let mut store = OrderStore::new();
        store.create(order(1, "A1", 10, 250.0)).unwrap();
        store.create(order(2, "A1", 30, 150.0)).unwrap();

        let results = store.analyze().unwrap();
        assert_eq!(results[0].average_quantity, 20.0);
        assert_eq!(results[0].average_price, 175.0);
    }
}
