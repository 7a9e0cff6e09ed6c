//! Prepared page cache, page discovery and prefetch gates.

pub mod asset_cache;
pub mod discovery;
pub mod gate;

pub use asset_cache::*;
pub use gate::PrefetchGate;
