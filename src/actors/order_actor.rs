use actix::prelude::*;
use async_trait::async_trait;

use crate::domain::order::{OrderError, OrderStore};
use crate::domain::pricing::OrderSource;
use crate::health::{ComponentHealth, HealthCheckable, HealthStatus};
use crate::models::{AnalysisResult, Order};

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct CreateOrder(pub Order);

#[derive(Message)]
#[rtype(result = "Vec<Order>")]
pub struct ListOrders;

#[derive(Message)]
#[rtype(result = "Result<Vec<AnalysisResult>, OrderError>")]
pub struct AnalyzeOrders;

#[derive(Message)]
#[rtype(result = "StoreHealth")]
pub struct GetStoreHealth;

#[derive(MessageResponse, Debug, Clone)]
pub struct StoreHealth(pub ComponentHealth);

// ============================================================================
// Order Actor - Single writer over the order store
// ============================================================================
//
// The mailbox serializes every message, so the duplicate check and the append
// in CreateOrder can never interleave with another create.
//
// ============================================================================

pub struct OrderActor {
    store: OrderStore,
}

impl OrderActor {
    pub fn new() -> Self {
        Self {
            store: OrderStore::new(),
        }
    }
}

impl Default for OrderActor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for OrderActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("OrderActor started");
    }
}

impl HealthCheckable for OrderActor {
    fn check_health(&self) -> ComponentHealth {
        ComponentHealth::new(self.component_name(), HealthStatus::Healthy)
            .with_details(format!("{} orders", self.store.len()))
    }

    fn component_name(&self) -> &str {
        "order_store"
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<CreateOrder> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: CreateOrder, _: &mut Self::Context) -> Self::Result {
        let order = msg.0;
        let order_id = order.id;

        match self.store.create(order) {
            Ok(order) => {
                tracing::info!(
                    order_id = order.id,
                    item_type = %order.item_type,
                    quantity = order.quantity,
                    price_per_item = order.price_per_item,
                    "Order created"
                );
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Order rejected");
                Err(e)
            }
        }
    }
}

impl Handler<ListOrders> for OrderActor {
    type Result = Vec<Order>;

    fn handle(&mut self, _: ListOrders, _: &mut Self::Context) -> Self::Result {
        self.store.list().to_vec()
    }
}

impl Handler<AnalyzeOrders> for OrderActor {
    type Result = Result<Vec<AnalysisResult>, OrderError>;

    fn handle(&mut self, _: AnalyzeOrders, _: &mut Self::Context) -> Self::Result {
        let results = self.store.analyze()?;
        tracing::debug!(
            orders = self.store.len(),
            item_types = results.len(),
            "Analyzed orders"
        );
        Ok(results)
    }
}

impl Handler<GetStoreHealth> for OrderActor {
    type Result = StoreHealth;

    fn handle(&mut self, _: GetStoreHealth, _: &mut Self::Context) -> Self::Result {
        StoreHealth(self.check_health())
    }
}

// ============================================================================
// In-process order source
// ============================================================================

#[async_trait]
impl OrderSource for Addr<OrderActor> {
    async fn fetch_orders(&self) -> anyhow::Result<Vec<Order>> {
        Ok(self.send(ListOrders).await?)
    }

    fn name(&self) -> &str {
        "order_actor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, item_type: &str) -> Order {
        Order {
            id,
            item_type: item_type.to_string(),
            quantity: 10,
            price_per_item: 250.0,
        }
    }

    #[actix::test]
    async fn test_create_then_list() {
        let addr = OrderActor::new().start();

        let created = addr.send(CreateOrder(order(1, "A1"))).await.unwrap().unwrap();
        assert_eq!(created, order(1, "A1"));

        let orders = addr.send(ListOrders).await.unwrap();
        assert_eq!(orders, vec![order(1, "A1")]);
    }

    #[actix::test]
    async fn test_duplicate_is_rejected() {
        let addr = OrderActor::new().start();

        addr.send(CreateOrder(order(1, "A1"))).await.unwrap().unwrap();
        let result = addr.send(CreateOrder(order(1, "B2"))).await.unwrap();

        assert_eq!(result, Err(OrderError::DuplicateKey(1)));
        assert_eq!(addr.send(ListOrders).await.unwrap().len(), 1);
    }

    #[actix::test]
    async fn test_concurrent_creates_with_same_id() {
        let addr = OrderActor::new().start();

        let sends = (0..32).map(|i| addr.send(CreateOrder(order(7, &format!("T{i}")))));
        let results = futures_util::future::join_all(sends).await;

        let accepted = results
            .into_iter()
            .map(|r| r.unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(addr.send(ListOrders).await.unwrap().len(), 1);
    }

    #[actix::test]
    async fn test_analyze_empty_store() {
        let addr = OrderActor::new().start();
        let result = addr.send(AnalyzeOrders).await.unwrap();
        assert_eq!(result, Err(OrderError::NotFound));
    }

    #[actix::test]
    async fn test_store_health_reports_size() {
        let addr = OrderActor::new().start();
        addr.send(CreateOrder(order(1, "A1"))).await.unwrap().unwrap();

        let StoreHealth(health) = addr.send(GetStoreHealth).await.unwrap();
        assert!(health.status.is_healthy());
        assert_eq!(health.details.as_deref(), Some("1 orders"));
    }

    #[actix::test]
    async fn test_actor_as_order_source() {
        let addr = OrderActor::new().start();
        addr.send(CreateOrder(order(1, "A1"))).await.unwrap().unwrap();

        let orders = addr.fetch_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(OrderSource::name(&addr), "order_actor");
    }
}
