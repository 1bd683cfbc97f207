pub mod fetcher;
pub mod format;
pub mod pages;

pub use fetcher::ReqwestFetcher;
pub use format::{HtmlPage, JsonDocument};
pub use pages::{
    ArenaPage, DivisionsPage, EventLocationsFeed, EventsPage, GameReportsPage, RosterPage,
    SchedulePage, TeamsPage,
};
