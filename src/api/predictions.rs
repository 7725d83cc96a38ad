use actix_web::{web, HttpResponse};
use std::time::Instant;

use crate::domain::pricing::{PredictionError, PricePredictor};
use crate::health::{ComponentHealth, HealthStatus, SystemHealth};
use crate::metrics::{metrics_handler, Metrics};
use crate::models::PredictionRequest;
use super::ApiError;

/// Routes of the price predictor. Expects `Data<PricePredictor>` and
/// `Data<Metrics>` in app data.
pub fn configure_predictor(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict_price/", web::post().to(predict_price))
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics_handler));
}

fn outcome_label(result: &Result<impl Sized, PredictionError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(PredictionError::NoDataForItemType(_)) => "no_data",
        Err(PredictionError::UpstreamUnavailable(_)) => "upstream_unavailable",
        Err(PredictionError::Internal(_)) => "internal",
    }
}

async fn predict_price(
    predictor: web::Data<PricePredictor>,
    metrics: web::Data<Metrics>,
    body: web::Json<PredictionRequest>,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let result = predictor.predict(&body).await;
    metrics.record_prediction(outcome_label(&result), started.elapsed().as_secs_f64());

    if let Some(state) = predictor.source().circuit_state().await {
        metrics.set_upstream_circuit_state(state.gauge_value());
    }

    Ok(HttpResponse::Ok().json(result?))
}

async fn health(predictor: web::Data<PricePredictor>) -> HttpResponse {
    let source = predictor.source();
    let upstream = match source.circuit_state().await {
        Some(state) => ComponentHealth::new(source.name(), state.as_health())
            .with_details(format!("circuit {state:?}")),
        None => ComponentHealth::new(source.name(), HealthStatus::Healthy),
    };

    let health = SystemHealth::from_components("price-predictor", vec![upstream]);
    if health.status.is_unhealthy() {
        return HttpResponse::ServiceUnavailable().json(health);
    }
    HttpResponse::Ok().json(health)
}
