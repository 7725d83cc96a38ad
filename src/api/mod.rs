// ============================================================================
// HTTP Layer
// ============================================================================
//
// Route tables for both services plus the pieces they share: the JSON body
// error handler, request metrics middleware and /metrics.
//
// ============================================================================

mod errors;
mod orders;
mod predictions;

pub use errors::ApiError;
pub use orders::configure_order_service;
pub use predictions::configure_predictor;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error,
};

use crate::metrics::Metrics;

/// JSON extractor config turning parse and type errors into 400 + detail
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Malformed request body");
        ApiError::MalformedInput(err.to_string()).into()
    })
}

/// Count every response by matched route and status. Use with
/// `actix_web::middleware::from_fn`.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let metrics = req.app_data::<web::Data<Metrics>>().cloned();
    let res = next.call(req).await?;

    if let Some(metrics) = metrics {
        let route = res
            .request()
            .match_pattern()
            .unwrap_or_else(|| "unmatched".to_string());
        metrics.record_request(&route, res.status().as_u16());
    }

    Ok(res)
}
