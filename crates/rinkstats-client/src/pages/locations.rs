use rinkstats_core::error::CollectError;
use rinkstats_core::models::{PageLocator, PlayByPlay};
use rinkstats_core::season::SeasonCode;
use rinkstats_core::traits::Collector;
use serde_json::Value;

use crate::format::JsonDocument;

/// The play-by-play JSON feed with rink coordinates for each play.
///
/// The feed's game id prefixes the report id with the season's opening
/// year, so `20132014` and report `020971` address game `2013020971`.
pub struct EventLocationsFeed {
    locator: PageLocator,
}

impl EventLocationsFeed {
    pub fn new(season: &SeasonCode, report_id: &str) -> Self {
        EventLocationsFeed {
            locator: PageLocator::new(format!(
                "http://live.nhl.com/GameData/{}/{}{}/PlayByPlay.json",
                season,
                season.opening_year(),
                report_id
            )),
        }
    }

    fn team_name(&self, doc: &Value, key: &str) -> Result<String, CollectError> {
        doc.pointer(&format!("/data/game/{key}"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                CollectError::extraction(
                    &self.locator.url,
                    format!("play-by-play feed has no {key}"),
                )
            })
    }
}

impl Collector for EventLocationsFeed {
    type Format = JsonDocument;
    type Record = PlayByPlay;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    fn verify(&self, doc: &Value) -> Result<(), CollectError> {
        if doc.get("data").is_none() {
            return Err(CollectError::unexpected(
                &self.locator.url,
                "data section of JSON does not exist",
            ));
        }
        Ok(())
    }

    fn extract(&self, doc: &Value) -> Result<PlayByPlay, CollectError> {
        let plays = doc
            .pointer("/data/game/plays/play")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                CollectError::extraction(
                    &self.locator.url,
                    "play-by-play feed has no plays array",
                )
            })?;
        Ok(PlayByPlay {
            plays,
            away: self.team_name(doc, "awayteamname")?,
            home: self.team_name(doc, "hometeamname")?,
        })
    }
}
