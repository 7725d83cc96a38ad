// ============================================================================
// HTTP Clients
// ============================================================================
//
// Typed reqwest clients for both services. The predictor uses the order
// client as its upstream; the CLI uses both.
//
// ============================================================================

mod errors;
mod order_client;
mod predictor_client;

pub use errors::ClientError;
pub use order_client::OrderServiceClient;
pub use predictor_client::PredictorClient;

use serde::de::DeserializeOwned;

use crate::models::ErrorBody;

/// Turn a response into `T`, or into `ClientError::Api` carrying the
/// service's `detail` for any non-2xx status.
pub(crate) async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.detail)
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("http://127.0.0.1:8000", "/orders/"), "http://127.0.0.1:8000/orders/");
        assert_eq!(endpoint("http://127.0.0.1:8000/", "orders/analysis/"), "http://127.0.0.1:8000/orders/analysis/");
    }
}
