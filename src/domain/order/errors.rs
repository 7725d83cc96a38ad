// ============================================================================
// Order Store Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order ID already exists")]
    DuplicateKey(i64),

    #[error("No orders found")]
    NotFound,

    #[error("Analysis of item type {0} produced a non-finite value")]
    NonFiniteAggregate(String),
}
