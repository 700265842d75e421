pub mod completeness;
pub mod context;
pub mod penalty;
pub mod score_aggregators;
pub mod standings;

pub use completeness::*;
pub use context::*;
pub use penalty::*;
pub use score_aggregators::*;
pub use standings::*;
