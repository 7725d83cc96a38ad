use actix::Actor;
use actix_web::{middleware::{from_fn, Logger}, web, App, HttpServer};
use clap::Parser;

use order_analytics::actors::OrderActor;
use order_analytics::api::{configure_order_service, json_config, track_requests};
use order_analytics::config::OrderServiceArgs;
use order_analytics::metrics::Metrics;
use order_analytics::telemetry::init_tracing;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = OrderServiceArgs::parse();

    tracing::info!("🚀 Starting order service");

    // === 1. Order store, owned by a single actor ===
    let store = web::Data::new(OrderActor::new().start());

    // === 2. Metrics registry ===
    let metrics = web::Data::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. HTTP server ===
    tracing::info!(host = %args.host, port = args.port, "Listening on http://{}:{}", args.host, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(metrics.clone())
            .app_data(json_config())
            .wrap(from_fn(track_requests))
            .wrap(Logger::default())
            .configure(configure_order_service)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    tracing::info!("🛑 Order service stopped");
    Ok(())
}
