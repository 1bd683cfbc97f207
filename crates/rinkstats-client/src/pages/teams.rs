use rinkstats_core::error::CollectError;
use rinkstats_core::models::{PageLocator, Team};
use rinkstats_core::traits::Collector;
use scraper::Html;

use crate::format::HtmlPage;
use crate::pages::{parent_element, sel, text_of};

/// The franchise cards on the league's teams page.
///
/// The schedule mixes non-league games in, so team discovery happens here
/// rather than by scanning schedules.
pub struct TeamsPage {
    locator: PageLocator,
}

impl TeamsPage {
    pub fn new() -> Self {
        TeamsPage {
            locator: PageLocator::new("http://www.nhl.com/ice/teams.htm"),
        }
    }
}

impl Default for TeamsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for TeamsPage {
    type Format = HtmlPage;
    type Record = Vec<Team>;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    fn extract(&self, doc: &Html) -> Result<Vec<Team>, CollectError> {
        let missing =
            |what: &str| CollectError::extraction(&self.locator.url, format!("team card has no {what}"));

        let mut teams: Vec<Team> = Vec::new();
        for card in doc.select(&sel("div.teamCard")) {
            let division = parent_element(card)
                .and_then(|container| container.value().attr("class"))
                .ok_or_else(|| missing("division container"))?
                .to_string();
            let city = card
                .select(&sel("span.teamPlace"))
                .next()
                .map(text_of)
                .ok_or_else(|| missing("place label"))?;
            let name = card
                .select(&sel("span.teamCommon"))
                .next()
                .map(text_of)
                .ok_or_else(|| missing("common name label"))?;
            let url = card
                .select(&sel("div.teamLogo > a"))
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| missing("logo link"))?
                .to_string();
            // The card's class list ends with the team code.
            let code = card
                .value()
                .attr("class")
                .and_then(|class| class.split_whitespace().last())
                .map(str::to_uppercase)
                .ok_or_else(|| missing("code class"))?;

            let team = Team {
                division,
                city,
                name,
                code,
                url,
            };
            // Cards repeat on the page; keep the first of each.
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
        Ok(teams)
    }
}
