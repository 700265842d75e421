pub mod args;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod quota;
pub mod score;
pub mod staleness;
pub mod storage;

pub use config::{ScoringPolicy, StalenessPolicy};
pub use error::CoreError;
pub use score::score_tournament;
pub use staleness::StalenessController;
