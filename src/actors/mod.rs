// ============================================================================
// Actors Module
// ============================================================================
//
// The order store lives inside OrderActor; HTTP handlers talk to it only
// through its address, injected as application data.
//
// ============================================================================

mod order_actor;

pub use order_actor::{
    AnalyzeOrders,
    CreateOrder,
    GetStoreHealth,
    ListOrders,
    OrderActor,
    StoreHealth,
};
