use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::season::{SeasonCode, SeasonType};

/// Address of a page a collector reads. Identity is the fully-formed URL;
/// the typed parameters it was built from stay on the collector itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PageLocator {
    pub url: String,
}

impl PageLocator {
    pub fn new(url: impl Into<String>) -> Self {
        PageLocator { url: url.into() }
    }
}

/// Conference → division → team names, in page order.
pub type DivisionMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// A home arena's postal address.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Arena {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// One franchise as listed on the league's teams page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Team {
    pub division: String,
    pub city: String,
    pub name: String,
    /// Short team code, e.g. "NYR". Also the subdomain of the team site.
    pub code: String,
    /// Team site URL as linked from the logo.
    pub url: String,
}

/// One row of a team's roster table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RosterPlayer {
    pub number: String,
    pub name: String,
    /// Absolute player profile URL.
    pub url: String,
    pub height: String,
    pub weight: String,
    pub birthdate: String,
    pub hometown: String,
}

/// One game from the schedule-by-season page.
///
/// `date` is the venue-local calendar date as printed; `time` is the start
/// time converted to UTC, or `None` when the listing still reads TBD.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduledGame {
    pub season: SeasonCode,
    #[serde(rename = "type")]
    pub kind: SeasonType,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub visitor: String,
    pub home: String,
}

impl ScheduledGame {
    /// Combined start timestamp; games without a published time sort at
    /// midnight of their date.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or_default())
    }
}

/// A scheduled game together with the report id its recap or preview link
/// carries, which keys the per-game report pages and feeds.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GameReport {
    pub game: ScheduledGame,
    pub report_id: String,
}

/// The play-by-play feed for one game: the raw plays array plus the team
/// names the feed labels its coordinates with.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PlayByPlay {
    pub plays: Vec<serde_json::Value>,
    pub away: String,
    pub home: String,
}

/// A skater or goaltender listed in an on-ice grid of the events report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OnIcePlayer {
    pub player: String,
    pub position: String,
}

/// One row of the official play-by-play events report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GameEvent {
    pub period: String,
    /// Elapsed period time as printed, e.g. "10:44".
    pub time: String,
    pub event: String,
    pub description: String,
    pub away: Vec<OnIcePlayer>,
    pub home: Vec<OnIcePlayer>,
}
