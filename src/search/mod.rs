//! Move selection: fixed-depth alpha-beta search over the legal moves

pub mod ordering;
pub mod params;
pub mod search;
pub mod stats;

pub use self::ordering::order_moves;
pub use self::params::SearchParams;
pub use self::search::{RootResult, Search};
pub use self::stats::SearchStats;
pub use crate::board::Move;
