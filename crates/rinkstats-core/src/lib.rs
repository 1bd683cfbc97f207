pub mod cache;
pub mod error;
pub mod loader;
pub mod models;
pub mod season;
pub mod testutil;
pub mod traits;
pub mod util;

pub use cache::CacheStore;
pub use error::CollectError;
pub use loader::PageLoader;
pub use models::{
    Arena, DivisionMap, GameEvent, GameReport, OnIcePlayer, PageLocator, PlayByPlay,
    RosterPlayer, ScheduledGame, Team,
};
pub use season::{SeasonCode, SeasonType};
pub use traits::{Collector, DocumentFormat, Fetcher};
pub use util::{compute_hash, eastern_to_utc};
