// handlers/mod.rs - HTTP handlers
//
// reflect: the gateway proxy
// summary: weekly text pre-aggregation
// system:  service info and liveness

pub mod reflect;
pub mod summary;
pub mod system;

pub use reflect::reflect;
pub use summary::weekly_summary;
pub use system::{health, root};
