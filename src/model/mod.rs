pub mod leaderboard;
pub mod snapshot;
pub mod team;
pub mod utils;

pub use leaderboard::*;
pub use snapshot::*;
pub use team::*;
pub use utils::*;
