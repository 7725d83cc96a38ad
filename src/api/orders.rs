use actix::Addr;
use actix_web::{web, HttpResponse};

use crate::actors::{AnalyzeOrders, CreateOrder, GetStoreHealth, ListOrders, OrderActor, StoreHealth};
use crate::domain::order::OrderError;
use crate::health::SystemHealth;
use crate::metrics::{metrics_handler, Metrics};
use crate::models::Order;
use super::ApiError;

/// Routes of the order service. Expects `Data<Addr<OrderActor>>` and
/// `Data<Metrics>` in app data.
pub fn configure_order_service(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/orders/")
            .route(web::post().to(create_order))
            .route(web::get().to(list_orders)),
    )
    .route("/orders/analysis/", web::get().to(analyze_orders))
    .route("/health", web::get().to(health))
    .route("/metrics", web::get().to(metrics_handler));
}

async fn create_order(
    store: web::Data<Addr<OrderActor>>,
    metrics: web::Data<Metrics>,
    body: web::Json<Order>,
) -> Result<HttpResponse, ApiError> {
    match store.send(CreateOrder(body.into_inner())).await? {
        Ok(order) => {
            metrics.record_order_created();
            Ok(HttpResponse::Ok().json(order))
        }
        Err(e) => {
            if let OrderError::DuplicateKey(_) = e {
                metrics.record_order_rejected("duplicate_key");
            }
            Err(e.into())
        }
    }
}

async fn list_orders(store: web::Data<Addr<OrderActor>>) -> Result<HttpResponse, ApiError> {
    let orders = store.send(ListOrders).await?;
    Ok(HttpResponse::Ok().json(orders))
}

async fn analyze_orders(store: web::Data<Addr<OrderActor>>) -> Result<HttpResponse, ApiError> {
    let analysis = store.send(AnalyzeOrders).await??;
    Ok(HttpResponse::Ok().json(analysis))
}

async fn health(store: web::Data<Addr<OrderActor>>) -> Result<HttpResponse, ApiError> {
    let StoreHealth(store_health) = store.send(GetStoreHealth).await?;
    let health = SystemHealth::from_components("order-service", vec![store_health]);

    if health.status.is_unhealthy() {
        return Ok(HttpResponse::ServiceUnavailable().json(health));
    }
    Ok(HttpResponse::Ok().json(health))
}
