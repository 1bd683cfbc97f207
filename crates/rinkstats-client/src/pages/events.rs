use rinkstats_core::error::CollectError;
use rinkstats_core::models::{GameEvent, OnIcePlayer, PageLocator};
use rinkstats_core::season::SeasonCode;
use rinkstats_core::traits::Collector;
use scraper::{ElementRef, Html};

use crate::format::HtmlPage;
use crate::pages::{child_elements, leading_text, nested_cells, sel, text_of, NBSP};

/// Text content of the column-header row on the retired report layout,
/// which lacked the per-team Visitor and Home tables. The site serialized
/// it with CRLF line breaks; the parser folds those to LF.
const RETIRED_HEADER: &str =
    "\n#\nPer\nStr\nTime:ElapsedGame\nEvent\nDescription\nTOR On Ice\nWSH On Ice\n";

/// The HTML play-by-play report, one row per game event.
pub struct EventsPage {
    locator: PageLocator,
}

impl EventsPage {
    pub fn new(season: &SeasonCode, report_id: &str) -> Self {
        EventsPage {
            locator: PageLocator::new(format!(
                "http://www.nhl.com/scores/htmlreports/{season}/PL{report_id}.HTM"
            )),
        }
    }

    /// One side's "On Ice" cell nests a table per skater, with `&nbsp;`
    /// spacer cells between them; each skater table is a two-row grid of
    /// name over position.
    fn on_ice(&self, cell: ElementRef<'_>) -> Result<Vec<OnIcePlayer>, CollectError> {
        let mut players = Vec::new();
        for skater in nested_cells(cell) {
            if text_of(skater).contains(NBSP) {
                continue;
            }
            let grid = nested_cells(skater);
            let &[name, position, ..] = grid.as_slice() else {
                return Err(CollectError::extraction(
                    &self.locator.url,
                    "on-ice player cell is missing its name and position",
                ));
            };
            players.push(OnIcePlayer {
                player: text_of(name).trim().to_string(),
                position: text_of(position).trim().to_string(),
            });
        }
        Ok(players)
    }
}

impl Collector for EventsPage {
    type Format = HtmlPage;
    type Record = Vec<GameEvent>;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    /// The retired layout reuses the event-row markup, so it decodes
    /// without complaint and extraction would silently misread it. Its
    /// header row is the tell: when that text appears, the Visitor and
    /// Home tables of the current layout must be present too.
    fn verify(&self, doc: &Html) -> Result<(), CollectError> {
        let retired_heading = doc.select(&sel("tr")).any(|row| text_of(row) == RETIRED_HEADER);
        let visitor = doc.select(&sel("table#Visitor")).next().is_some();
        let home = doc.select(&sel("table#Home")).next().is_some();
        if retired_heading && !(visitor && home) {
            return Err(CollectError::unexpected(
                &self.locator.url,
                "unable to locate events page as expected",
            ));
        }
        Ok(())
    }

    fn extract(&self, doc: &Html) -> Result<Vec<GameEvent>, CollectError> {
        let mut events = Vec::new();
        for row in doc.select(&sel("tr.evenColor")) {
            let cells = child_elements(row, "td");
            if cells.len() < 8 {
                return Err(CollectError::extraction(
                    &self.locator.url,
                    format!("event row has {} cells, expected 8", cells.len()),
                ));
            }
            events.push(GameEvent {
                period: leading_text(cells[1]),
                time: leading_text(cells[3]),
                event: leading_text(cells[4]),
                description: leading_text(cells[5]),
                away: self.on_ice(cells[6])?,
                home: self.on_ice(cells[7])?,
            });
        }
        Ok(events)
    }
}
