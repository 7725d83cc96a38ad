// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each area has its own subdirectory with its errors and logic:
// - order   - order store and per item type aggregation
// - pricing - linear price prediction over the order store
//
// Nothing here knows about HTTP or actors.
//
// ============================================================================

pub mod order;
pub mod pricing;
