// ============================================================================
// Pricing Domain - Per item type price prediction
// ============================================================================
//
// - Errors (PredictionError, RegressionError)
// - Regression (single feature OLS fit)
// - Source (OrderSource seam to the order store)
// - Predictor (fetch, filter, fit, evaluate)
//
// ============================================================================

pub mod errors;
pub mod regression;
pub mod source;
pub mod predictor;

pub use errors::*;
pub use regression::*;
pub use source::*;
pub use predictor::*;
