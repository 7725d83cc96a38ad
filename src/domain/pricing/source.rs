use async_trait::async_trait;

use crate::models::Order;
use crate::utils::CircuitState;

/// Where the predictor reads the current order set from.
///
/// In deployment this is the order service over HTTP (`OrderServiceClient`);
/// when both halves share a process it is the order actor itself. Either way
/// the predictor sees the same `Vec<Order>` the `GET /orders/` route returns.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self) -> anyhow::Result<Vec<Order>>;

    /// Short label for logs and health reporting
    fn name(&self) -> &str;

    /// State of the circuit guarding this source, if it has one
    async fn circuit_state(&self) -> Option<CircuitState> {
        None
    }
}
