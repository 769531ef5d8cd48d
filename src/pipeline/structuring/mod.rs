pub mod types;
pub mod classify;
pub mod scores;
pub mod context;
pub mod aggregator;

pub use types::*;
pub use classify::*;
pub use scores::*;
pub use context::*;
pub use aggregator::*;
