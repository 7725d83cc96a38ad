use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Order, PredictionRequest, PredictionResponse};
use super::errors::{PredictionError, RegressionError};
use super::regression::{round_to_cents, LinearModel};
use super::source::OrderSource;

// ============================================================================
// Price Predictor
// ============================================================================
//
// Orchestrates: OrderSource → filter by item type → fit → evaluate
//
// The model is refit on every call. A create landing between fetch and fit
// is simply not seen by this prediction.
//
// ============================================================================

pub struct PricePredictor {
    source: Arc<dyn OrderSource>,
}

impl PricePredictor {
    pub fn new(source: Arc<dyn OrderSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn OrderSource> {
        &self.source
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        let correlation_id = Uuid::new_v4();

        tracing::debug!(
            correlation_id = %correlation_id,
            item_type = %request.item_type,
            expected_quantity = request.expected_quantity,
            source = self.source.name(),
            "Fetching orders for prediction"
        );

        let orders = self.source.fetch_orders().await.map_err(|e| {
            tracing::error!(
                correlation_id = %correlation_id,
                error = %e,
                "Order source unavailable"
            );
            PredictionError::UpstreamUnavailable(e.to_string())
        })?;

        let model = fit_for_item_type(&request.item_type, &orders)?;
        let raw = model.predict(request.expected_quantity as f64);
        if !raw.is_finite() {
            tracing::error!(
                correlation_id = %correlation_id,
                item_type = %request.item_type,
                slope = model.slope,
                intercept = model.intercept,
                "Prediction is not a finite number"
            );
            return Err(PredictionError::Internal(format!(
                "non-finite prediction {raw} for item type {}",
                request.item_type
            )));
        }
        let predicted_price = round_to_cents(raw);

        tracing::info!(
            correlation_id = %correlation_id,
            item_type = %request.item_type,
            observations = model.observations,
            slope = model.slope,
            intercept = model.intercept,
            predicted_price,
            "Predicted price"
        );

        Ok(PredictionResponse {
            item_type: request.item_type.clone(),
            expected_quantity: request.expected_quantity,
            predicted_price,
        })
    }
}

/// Fit quantity → price_per_item over the orders of exactly one item type
pub fn fit_for_item_type(item_type: &str, orders: &[Order]) -> Result<LinearModel, PredictionError> {
    let samples: Vec<(f64, f64)> = orders
        .iter()
        .filter(|o| o.item_type == item_type)
        .map(|o| (o.quantity as f64, o.price_per_item))
        .collect();

    LinearModel::fit(&samples).map_err(|e| match e {
        RegressionError::EmptySample => PredictionError::NoDataForItemType(item_type.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedOrders(Vec<Order>);

    #[async_trait]
    impl OrderSource for FixedOrders {
        async fn fetch_orders(&self) -> anyhow::Result<Vec<Order>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Unreachable;

    #[async_trait]
    impl OrderSource for Unreachable {
        async fn fetch_orders(&self) -> anyhow::Result<Vec<Order>> {
            anyhow::bail!("connection refused")
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    fn order(id: i64, item_type: &str, quantity: i64, price: f64) -> Order {
        Order {
            id,
            item_type: item_type.to_string(),
            quantity,
            price_per_item: price,
        }
    }

    fn predictor(orders: Vec<Order>) -> PricePredictor {
        PricePredictor::new(Arc::new(FixedOrders(orders)))
    }

    fn request(item_type: &str, expected_quantity: i64) -> PredictionRequest {
        PredictionRequest {
            item_type: item_type.to_string(),
            expected_quantity,
        }
    }

    #[tokio::test]
    async fn test_predicts_on_exact_line() {
        let predictor = predictor(vec![
            order(1, "A1", 10, 100.0),
            order(2, "A1", 20, 150.0),
            order(3, "A1", 30, 200.0),
        ]);

        let response = predictor.predict(&request("A1", 40)).await.unwrap();

        assert_eq!(
            response,
            PredictionResponse {
                item_type: "A1".to_string(),
                expected_quantity: 40,
                predicted_price: 250.0,
            }
        );
    }

    #[tokio::test]
    async fn test_zero_variance_predicts_mean() {
        let predictor = predictor(vec![
            order(1, "A", 10, 5.0),
            order(2, "A", 10, 7.0),
            order(3, "A", 10, 9.0),
        ]);

        for quantity in [1, 10, 500] {
            let response = predictor.predict(&request("A", quantity)).await.unwrap();
            assert_eq!(response.predicted_price, 7.0);
        }
    }

    #[tokio::test]
    async fn test_other_item_types_do_not_count() {
        let predictor = predictor(vec![
            order(1, "A", 10, 5.0),
            order(2, "B", 20, 500.0),
            order(3, "a", 30, 1000.0),
        ]);

        let response = predictor.predict(&request("A", 30)).await.unwrap();
        assert_eq!(response.predicted_price, 5.0);
    }

    #[tokio::test]
    async fn test_missing_item_type_is_no_data() {
        let predictor = predictor(vec![order(1, "B", 10, 5.0)]);

        let result = predictor.predict(&request("A", 10)).await;
        assert_eq!(result, Err(PredictionError::NoDataForItemType("A".to_string())));
    }

    #[tokio::test]
    async fn test_empty_store_is_no_data() {
        let predictor = predictor(vec![]);

        let result = predictor.predict(&request("A", 10)).await;
        assert!(matches!(result, Err(PredictionError::NoDataForItemType(_))));
    }

    #[tokio::test]
    async fn test_prediction_is_rounded() {
        // slope 1/3, intercept 0 → 10/3 at x = 10
        let predictor = predictor(vec![order(1, "R", 3, 1.0), order(2, "R", 6, 2.0)]);

        let response = predictor.predict(&request("R", 10)).await.unwrap();
        assert_eq!(response.predicted_price, 3.33);
    }

    #[tokio::test]
    async fn test_source_failure_is_upstream_unavailable() {
        let predictor = PricePredictor::new(Arc::new(Unreachable));

        let result = predictor.predict(&request("A", 10)).await;
        assert!(matches!(result, Err(PredictionError::UpstreamUnavailable(msg)) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_non_finite_prediction_is_internal() {
        // slope overflows to infinity, the line evaluates to NaN
        let predictor = predictor(vec![order(1, "A", 1, -1e308), order(2, "A", 2, 1e308)]);

        let result = predictor.predict(&request("A", 3)).await;
        assert!(matches!(result, Err(PredictionError::Internal(_))));
    }

    #[tokio::test]
    async fn test_half_cent_ties_round_to_even() {
        let predictor = predictor(vec![order(1, "T", 10, 0.125)]);

        let response = predictor.predict(&request("T", 10)).await.unwrap();
        assert_eq!(response.predicted_price, 0.12);
    }

    #[test]
    fn test_fit_for_item_type_filters_exactly() {
        let orders = vec![order(1, "A1", 10, 100.0), order(2, "A1 ", 20, 999.0)];
        let model = fit_for_item_type("A1", &orders).unwrap();
        assert_eq!(model.observations, 1);
    }
}
