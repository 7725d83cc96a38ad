use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::pricing::OrderSource;
use crate::models::{AnalysisResult, Order};
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
use super::{endpoint, read_response, ClientError};

/// Client for the order service routes.
///
/// When built with a circuit breaker, `fetch_orders` (the predictor's upstream
/// read) goes through it; the plain methods used by the CLI do not.
pub struct OrderServiceClient {
    client: Client,
    base_url: String,
    circuit_breaker: Option<CircuitBreaker>,
}

impl OrderServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            circuit_breaker: None,
        })
    }

    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = Some(CircuitBreaker::new(config));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create(&self, order: &Order) -> Result<Order, ClientError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "/orders/"))
            .json(order)
            .send()
            .await?;

        read_response(response).await
    }

    pub async fn list(&self) -> Result<Vec<Order>, ClientError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/orders/"))
            .send()
            .await?;

        read_response(response).await
    }

    pub async fn analyze(&self) -> Result<Vec<AnalysisResult>, ClientError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/orders/analysis/"))
            .send()
            .await?;

        read_response(response).await
    }

    async fn list_guarded(&self) -> Result<Vec<Order>, ClientError> {
        let Some(breaker) = &self.circuit_breaker else {
            return self.list().await;
        };

        match breaker.call(self.list()).await {
            Ok(orders) => Ok(orders),
            Err(CircuitBreakerError::CircuitOpen) => {
                tracing::warn!(base_url = %self.base_url, "Order service circuit open, skipping call");
                Err(ClientError::CircuitOpen)
            }
            Err(CircuitBreakerError::OperationFailed(e)) => Err(e),
        }
    }
}

#[async_trait]
impl OrderSource for OrderServiceClient {
    async fn fetch_orders(&self) -> anyhow::Result<Vec<Order>> {
        let orders = self.list_guarded().await?;
        tracing::debug!(count = orders.len(), base_url = %self.base_url, "Fetched orders");
        Ok(orders)
    }

    fn name(&self) -> &str {
        "order_service"
    }

    async fn circuit_state(&self) -> Option<CircuitState> {
        match &self.circuit_breaker {
            Some(breaker) => Some(breaker.state().await),
            None => None,
        }
    }
}
