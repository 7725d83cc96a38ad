// ============================================================================
// Price Prediction Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("No data available for item type: {0}")]
    NoDataForItemType(String),

    #[error("Failed to fetch orders from the external service: {0}")]
    UpstreamUnavailable(String),

    #[error("An error occurred during prediction: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressionError {
    #[error("Cannot fit a line to an empty sample")]
    EmptySample,
}
