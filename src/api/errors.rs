use actix::MailboxError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::domain::order::OrderError;
use crate::domain::pricing::PredictionError;
use crate::models::ErrorBody;

// ============================================================================
// API Errors - one place mapping every error kind to a status and a detail
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// Body failed to parse or a field had the wrong type
    #[error("{0}")]
    MalformedInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MailboxError> for ApiError {
    fn from(e: MailboxError) -> Self {
        ApiError::Internal(format!("order actor unavailable: {e}"))
    }
}

impl ApiError {
    /// The `detail` callers see. Upstream and internal causes stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Order(OrderError::NonFiniteAggregate(_)) => "Internal server error".to_string(),
            ApiError::Order(e) => e.to_string(),
            ApiError::Prediction(PredictionError::NoDataForItemType(item_type)) => {
                format!("No data available for item type: {item_type}")
            }
            ApiError::Prediction(PredictionError::UpstreamUnavailable(_)) => {
                "Failed to fetch orders from the external service".to_string()
            }
            ApiError::Prediction(PredictionError::Internal(_)) => {
                "An error occurred during prediction".to_string()
            }
            ApiError::MalformedInput(msg) => msg.clone(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(OrderError::DuplicateKey(_)) => StatusCode::BAD_REQUEST,
            ApiError::Order(OrderError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Order(OrderError::NonFiniteAggregate(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Prediction(PredictionError::NoDataForItemType(_)) => StatusCode::BAD_REQUEST,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorBody::new(self.detail()))
    }
}
