// ============================================================================
// Order Domain - In-memory order store and per item type aggregation
// ============================================================================
//
// - Errors (OrderError enum)
// - Analysis (ItemAccumulator, analyze)
// - Store (OrderStore, owned by the order actor)
//
// ============================================================================

pub mod errors;
pub mod analysis;
pub mod store;

pub use errors::*;
pub use analysis::*;
pub use store::*;
