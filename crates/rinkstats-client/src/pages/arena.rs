use std::sync::LazyLock;

use regex::Regex;
use rinkstats_core::error::CollectError;
use rinkstats_core::models::{Arena, PageLocator};
use rinkstats_core::traits::Collector;
use scraper::Html;

use crate::format::HtmlPage;

// The modal builds its address block in script text, so the markup appears
// literally in the page's text content.
static ADDRESS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<div style="font-weight: normal; font-size: 12px; font-family: arial,helvetica;"><b>(?P<name>[\w\s\-,\.&À-ú]+)</b><br />(?P<street>[\w\s\-,\.&À-ú]+)<br />(?P<city>[\w\s\-,\.&À-ú]+), (?P<state>[A-Z]{2}), (?P<country>[\w\s\-,\.&À-ú]+)  (?P<postal_code>[\w\s\-,\.&]+)<br /></div>"#,
    )
    .unwrap()
});

/// The postal address of one team's home arena, read from the team map
/// modal.
pub struct ArenaPage {
    locator: PageLocator,
}

impl ArenaPage {
    pub fn new(team: &str) -> Self {
        ArenaPage {
            locator: PageLocator::new(format!(
                "http://www.nhl.com/ice/ajax/teammapmodal?team={team}"
            )),
        }
    }
}

impl Collector for ArenaPage {
    type Format = HtmlPage;
    type Record = Arena;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    fn extract(&self, doc: &Html) -> Result<Arena, CollectError> {
        let text: String = doc.root_element().text().collect();
        let caps = ADDRESS_BLOCK.captures(&text).ok_or_else(|| {
            CollectError::extraction(&self.locator.url, "no arena address block found")
        })?;
        let field = |name: &str| caps[name].to_string();

        Ok(Arena {
            name: field("name"),
            street: field("street"),
            city: field("city"),
            state: field("state"),
            country: field("country"),
            postal_code: field("postal_code"),
        })
    }
}
