//! Settings resolution, the shared fetch policy and the builder helpers.

pub use cascade::*;
pub use css::*;
pub use fetch_cache::*;
pub use local_cache::*;
pub use settings_sync::*;

mod cascade;
mod css;
mod fetch_cache;
mod local_cache;
pub mod reorder;
mod settings_sync;
