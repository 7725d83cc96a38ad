use actix_web::{middleware::{from_fn, Logger}, web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;

use order_analytics::api::{configure_predictor, json_config, track_requests};
use order_analytics::client::OrderServiceClient;
use order_analytics::config::PredictorArgs;
use order_analytics::domain::pricing::PricePredictor;
use order_analytics::metrics::Metrics;
use order_analytics::telemetry::init_tracing;
use order_analytics::utils::CircuitBreakerConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = PredictorArgs::parse();

    tracing::info!("🚀 Starting price predictor");

    // === 1. Upstream order service client (with circuit breaker) ===
    let breaker = CircuitBreakerConfig::from(&args.breaker);
    tracing::info!(
        order_service_url = %args.order_service_url,
        failure_threshold = breaker.failure_threshold,
        timeout_secs = breaker.timeout.as_secs(),
        "Configuring order service client"
    );
    let client = OrderServiceClient::new(args.order_service_url.clone(), args.request_timeout())?
        .with_circuit_breaker(breaker);

    let predictor = web::Data::new(PricePredictor::new(Arc::new(client)));

    // === 2. Metrics registry ===
    let metrics = web::Data::new(Metrics::new()?);

    // === 3. HTTP server ===
    tracing::info!(host = %args.host, port = args.port, "Listening on http://{}:{}", args.host, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(predictor.clone())
            .app_data(metrics.clone())
            .app_data(json_config())
            .wrap(from_fn(track_requests))
            .wrap(Logger::default())
            .configure(configure_predictor)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    tracing::info!("🛑 Price predictor stopped");
    Ok(())
}
