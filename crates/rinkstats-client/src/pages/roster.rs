use rinkstats_core::error::CollectError;
use rinkstats_core::models::{PageLocator, RosterPlayer};
use rinkstats_core::traits::Collector;
use scraper::Html;
use url::Url;

use crate::format::HtmlPage;
use crate::pages::{child_elements, leading_text, sel};

/// A team's roster tables (forwards, defensemen, goaltenders).
pub struct RosterPage {
    locator: PageLocator,
    team_domain: String,
}

impl RosterPage {
    pub fn new(team: &str) -> Self {
        RosterPage {
            locator: PageLocator::new(format!("http://{team}.nhl.com/club/roster.htm")),
            team_domain: format!("http://{team}.nhl.com"),
        }
    }

    fn missing(&self, what: &str) -> CollectError {
        CollectError::extraction(&self.locator.url, format!("roster row is missing its {what}"))
    }
}

impl Collector for RosterPage {
    type Format = HtmlPage;
    type Record = Vec<RosterPlayer>;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    /// Each of the three position tables carries a linked "Name" column in
    /// its header row; anything else means a redesigned or substitute page.
    fn verify(&self, doc: &Html) -> Result<(), CollectError> {
        let anchors: Vec<_> = doc
            .select(&sel("table.data > tbody > tr.hdr > td:nth-of-type(2) > a"))
            .collect();
        let labelled = anchors
            .first()
            .is_some_and(|anchor| leading_text(*anchor).contains("Name"));
        if anchors.len() != 3 || !labelled {
            return Err(CollectError::unexpected(
                &self.locator.url,
                "unable to locate roster header as expected",
            ));
        }
        Ok(())
    }

    fn extract(&self, doc: &Html) -> Result<Vec<RosterPlayer>, CollectError> {
        let base = Url::parse(&self.team_domain).map_err(|e| {
            CollectError::extraction(&self.locator.url, format!("bad team domain: {e}"))
        })?;

        let mut players = Vec::new();
        for row in doc.select(&sel("table.data > tbody > tr")) {
            // Player rows are the classed ones; unclassed rows are layout.
            let keep = row.value().attr("class").is_some_and(|class| class != "hdr");
            if !keep {
                continue;
            }
            // Full-width placeholder rows in otherwise empty tables.
            let cells = child_elements(row, "td");
            if cells.iter().any(|td| td.value().attr("colspan") == Some("7")) {
                continue;
            }

            let number = row
                .select(&sel("td > span.sweaterNo"))
                .next()
                .map(leading_text)
                .ok_or_else(|| self.missing("sweater number"))?;
            let name_link = row
                .select(&sel("td > nobr > a"))
                .next()
                .ok_or_else(|| self.missing("name link"))?;
            let href = name_link
                .value()
                .attr("href")
                .ok_or_else(|| self.missing("profile link"))?;
            let url = base.join(href).map_err(|e| {
                CollectError::extraction(
                    &self.locator.url,
                    format!("bad player link {href:?}: {e}"),
                )
            })?;

            let column = |idx: usize, what: &str| {
                cells
                    .get(idx)
                    .map(|td| leading_text(*td))
                    .ok_or_else(|| self.missing(what))
            };

            players.push(RosterPlayer {
                number,
                name: leading_text(name_link),
                url: url.to_string(),
                height: column(2, "height column")?,
                weight: column(3, "weight column")?,
                birthdate: column(4, "birthdate column")?,
                hometown: column(6, "hometown column")?,
            });
        }
        Ok(players)
    }
}
