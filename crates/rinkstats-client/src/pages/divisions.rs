use std::sync::LazyLock;

use regex::Regex;
use rinkstats_core::error::CollectError;
use rinkstats_core::models::{DivisionMap, PageLocator};
use rinkstats_core::season::SeasonCode;
use rinkstats_core::traits::Collector;
use scraper::{ElementRef, Html};

use crate::format::HtmlPage;
use crate::pages::{child_elements, leading_text, parent_named, preceding_siblings, sel};

static ANY_SEASON_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}").unwrap());

const CONFERENCE_PREFIX: &str = "conferenceHeader";

/// Conference and division membership from the standings-by-division page.
///
/// The page does not state a team's division or conference as a field, so
/// both are resolved structurally: the division from the table header above
/// the team's row group, the conference from the banner div preceding the
/// enclosing table.
pub struct DivisionsPage {
    locator: PageLocator,
    season: Option<SeasonCode>,
}

impl DivisionsPage {
    /// Standings for a season, or for the current one when `season` is
    /// omitted.
    pub fn new(season: Option<SeasonCode>) -> Self {
        let code = season.as_ref().map_or("", SeasonCode::as_str);
        DivisionsPage {
            locator: PageLocator::new(format!(
                "http://www.nhl.com/ice/standings.htm?season={code}&type=DIV"
            )),
            season,
        }
    }

    fn landmark(&self, team: &str, what: &str) -> CollectError {
        CollectError::extraction(&self.locator.url, format!("no {what} found for {team}"))
    }

    /// Division name: nearest preceding `thead` of the team's row group,
    /// first header row, `th[abbr="DIV"]`.
    fn division_of(&self, body: ElementRef<'_>, team: &str) -> Result<String, CollectError> {
        let head = preceding_siblings(body)
            .find(|sibling| sibling.value().name() == "thead")
            .ok_or_else(|| self.landmark(team, "division header"))?;
        let first_row = child_elements(head, "tr")
            .into_iter()
            .next()
            .ok_or_else(|| self.landmark(team, "division header row"))?;
        child_elements(first_row, "th")
            .into_iter()
            .find(|th| th.value().attr("abbr") == Some("DIV"))
            .map(leading_text)
            .ok_or_else(|| self.landmark(team, "division column"))
    }

    /// Conference name: nearest preceding banner div of the enclosing
    /// table, with the class prefix stripped off.
    fn conference_of(&self, body: ElementRef<'_>, team: &str) -> Result<String, CollectError> {
        let table =
            parent_named(body, "table").ok_or_else(|| self.landmark(team, "standings table"))?;
        preceding_siblings(table)
            .filter(|sibling| sibling.value().name() == "div")
            .find_map(|banner| {
                banner
                    .value()
                    .attr("class")?
                    .strip_prefix(CONFERENCE_PREFIX)
                    .map(str::to_string)
            })
            .ok_or_else(|| self.landmark(team, "conference header"))
    }
}

impl Collector for DivisionsPage {
    type Format = HtmlPage;
    type Record = DivisionMap;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    fn verify(&self, doc: &Html) -> Result<(), CollectError> {
        let header = doc
            .select(&sel("div.sectionHeader > h3"))
            .next()
            .map(|h3| leading_text(h3).trim().to_string());

        let expected = match &self.season {
            Some(season) => season.label(),
            None => "any YYYY-YYYY".to_string(),
        };
        let Some(found) = header else {
            return Err(CollectError::unexpected(
                &self.locator.url,
                format!("expected {expected} season, found no season header"),
            ));
        };
        let matches = match &self.season {
            Some(season) => found.starts_with(&season.label()),
            None => ANY_SEASON_LABEL.is_match(&found),
        };
        if !matches {
            return Err(CollectError::unexpected(
                &self.locator.url,
                format!("expected {expected} season, found {found}"),
            ));
        }
        Ok(())
    }

    fn extract(&self, doc: &Html) -> Result<DivisionMap, CollectError> {
        // Active teams are the second link in their cell; teams that no
        // longer exist are plain spans.
        let mut teams: Vec<ElementRef<'_>> = doc
            .select(&sel(r#"td[style="text-align:left;"] > a:nth-of-type(2)"#))
            .collect();
        teams.extend(doc.select(&sel("span.team")));

        let mut results = DivisionMap::new();
        for el in teams {
            let name = leading_text(el);
            let body = parent_named(el, "td")
                .and_then(|td| parent_named(td, "tr"))
                .and_then(|tr| parent_named(tr, "tbody"))
                .ok_or_else(|| self.landmark(&name, "standings row group"))?;

            let division = self.division_of(body, &name)?;
            let conference = self.conference_of(body, &name)?;

            results
                .entry(conference)
                .or_default()
                .entry(division)
                .or_default()
                .push(name);
        }
        Ok(results)
    }
}
