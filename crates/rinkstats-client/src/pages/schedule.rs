use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use rinkstats_core::error::CollectError;
use rinkstats_core::models::{GameReport, PageLocator, ScheduledGame};
use rinkstats_core::season::{SeasonCode, SeasonType};
use rinkstats_core::traits::Collector;
use rinkstats_core::util::eastern_to_utc;
use scraper::{ElementRef, Html};

use crate::format::HtmlPage;
use crate::pages::{child_elements, leading_text, sel, text_of, NBSP};

// Matches the link kind to group 1 and the report id to group 2; the first
// four digits of the raw id repeat the season's opening year.
static REPORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^http://www\.nhl\.com/gamecenter/en/(recap|preview)\?id=[0-9]{4}([0-9]+)")
        .unwrap()
});

/// The schedule-by-season listing, filtered down to league games.
///
/// The site mixes olympic and exhibition entries into the table and marks
/// their team cells with a non-breaking space; those rows are dropped, as
/// are header rows without two team names.
pub struct SchedulePage {
    locator: PageLocator,
    season: SeasonCode,
    kind: SeasonType,
}

impl SchedulePage {
    pub fn new(season: SeasonCode, kind: SeasonType) -> Self {
        let locator = PageLocator::new(format!(
            "http://www.nhl.com/ice/schedulebyseason.htm?season={}&gameType={}&team=&network=&venue=",
            season,
            kind.id()
        ));
        SchedulePage {
            locator,
            season,
            kind,
        }
    }

    fn rows<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&sel("table.data.schedTbl > tbody > tr")).collect()
    }

    fn bad_row(&self, message: impl Into<String>) -> CollectError {
        CollectError::extraction(&self.locator.url, message)
    }

    /// One schedule row, or `None` for rows that are not league games.
    fn parse_row(&self, row: ElementRef<'_>) -> Result<Option<ScheduledGame>, CollectError> {
        let mut names = Vec::new();
        for cell in row.select(&sel("td.team > div.teamName")) {
            // Linked names keep their text on the anchor; defunct or
            // unlinked ones on the div itself.
            let own = leading_text(cell);
            if !own.is_empty() {
                names.push(own);
            }
            for anchor in child_elements(cell, "a") {
                let linked = leading_text(anchor);
                if !linked.is_empty() {
                    names.push(linked);
                }
            }
        }

        // Anything but two team entries is a header or filler row.
        let Ok([visitor, home]) = <[String; 2]>::try_from(names) else {
            return Ok(None);
        };
        if visitor.contains(NBSP) || home.contains(NBSP) {
            return Ok(None);
        }

        let date_el = row
            .select(&sel("td.date > div.skedStartDateSite"))
            .next()
            .ok_or_else(|| self.bad_row("schedule row has no start date"))?;
        let date_text = leading_text(date_el);
        let date = NaiveDate::parse_from_str(date_text.trim(), "%a %b %d, %Y")
            .map_err(|e| self.bad_row(format!("unparseable start date {:?}: {e}", date_text.trim())))?;

        let time_cell = row
            .select(&sel("td.time"))
            .next()
            .ok_or_else(|| self.bad_row("schedule row has no time cell"))?;
        let time = if text_of(time_cell).contains("TBD") {
            // Not scheduled yet; the row will firm up on a later pass.
            None
        } else {
            let time_el = time_cell
                .select(&sel("div.skedStartTimeEST"))
                .next()
                .ok_or_else(|| self.bad_row("schedule row has no listed start time"))?;
            let cleaned = leading_text(time_el).replace("ET", "");
            let local = NaiveTime::parse_from_str(cleaned.trim(), "%I:%M %p")
                .map_err(|e| self.bad_row(format!("unparseable start time {:?}: {e}", cleaned.trim())))?;
            Some(eastern_to_utc(date.and_time(local)).time())
        };

        Ok(Some(ScheduledGame {
            season: self.season.clone(),
            kind: self.kind,
            date,
            time,
            visitor,
            home,
        }))
    }
}

impl Collector for SchedulePage {
    type Format = HtmlPage;
    type Record = Vec<ScheduledGame>;

    fn locator(&self) -> &PageLocator {
        &self.locator
    }

    fn verify(&self, doc: &Html) -> Result<(), CollectError> {
        if Self::rows(doc).is_empty() {
            return Err(CollectError::unexpected(
                &self.locator.url,
                format!("no schedule block found on {} page", self.season),
            ));
        }
        Ok(())
    }

    fn extract(&self, doc: &Html) -> Result<Vec<ScheduledGame>, CollectError> {
        let mut games = Vec::new();
        for row in Self::rows(doc) {
            if let Some(game) = self.parse_row(row)? {
                games.push(game);
            }
        }
        Ok(games)
    }
}

/// The same schedule listing, keeping only rows whose recap or preview
/// link carries a game report id.
pub struct GameReportsPage {
    schedule: SchedulePage,
}

impl GameReportsPage {
    pub fn new(season: SeasonCode, kind: SeasonType) -> Self {
        GameReportsPage {
            schedule: SchedulePage::new(season, kind),
        }
    }
}

impl Collector for GameReportsPage {
    type Format = HtmlPage;
    type Record = Vec<GameReport>;

    fn locator(&self) -> &PageLocator {
        self.schedule.locator()
    }

    fn verify(&self, doc: &Html) -> Result<(), CollectError> {
        self.schedule.verify(doc)
    }

    fn extract(&self, doc: &Html) -> Result<Vec<GameReport>, CollectError> {
        let mut reports = Vec::new();
        for row in SchedulePage::rows(doc) {
            let Some(game) = self.schedule.parse_row(row)? else {
                continue;
            };
            let report_id = row
                .select(&sel("td.skedLinks > a"))
                .filter_map(|link| link.value().attr("href"))
                .find_map(|href| REPORT_LINK.captures(href))
                .and_then(|caps| caps.get(2))
                .map(|id| id.as_str().to_string());

            // Rows without a resolvable report id are dropped.
            if let Some(report_id) = report_id {
                reports.push(GameReport { game, report_id });
            }
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinkstats_core::cache::CacheStore;
    use rinkstats_core::loader::PageLoader;
    use rinkstats_core::testutil::MockFetcher;

    fn page() -> SchedulePage {
        SchedulePage::new(SeasonCode::new("20132014").unwrap(), SeasonType::Regular)
    }

    fn schedule_doc(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table class="data schedTbl"><tbody>{rows}</tbody></table></body></html>"#
        ))
    }

    fn game_row(visitor: &str, home: &str, date: &str, time_cell: &str, links: &str) -> String {
        format!(
            r#"<tr>
<td class="date"><div class="skedStartDateSite">{date}</div></td>
<td class="team"><div class="teamName"><a href="/jets">{visitor}</a></div></td>
<td class="team"><div class="teamName"><a href="/oilers">{home}</a></div></td>
<td class="time">{time_cell}</td>
<td class="skedLinks">{links}</td>
</tr>"#
        )
    }

    fn timed(time: &str) -> String {
        format!(r#"<div class="skedStartTimeEST">{time}</div>"#)
    }

    #[test]
    fn full_row_yields_a_utc_time() {
        let doc = schedule_doc(&game_row(
            "Winnipeg Jets",
            "Edmonton Oilers",
            "Tue Oct 1, 2013",
            &timed("3:00 PM ET"),
            "",
        ));
        let games = page().extract(&doc).unwrap();

        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.visitor, "Winnipeg Jets");
        assert_eq!(game.home, "Edmonton Oilers");
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2013, 10, 1).unwrap());
        assert_eq!(game.time, NaiveTime::from_hms_opt(20, 0, 0));
        assert_eq!(game.kind, SeasonType::Regular);
    }

    #[test]
    fn tbd_row_is_date_only_with_midnight_start() {
        let doc = schedule_doc(&game_row(
            "Winnipeg Jets",
            "Edmonton Oilers",
            "Tue Oct 1, 2013",
            "TBD",
            "",
        ));
        let games = page().extract(&doc).unwrap();

        assert_eq!(games[0].time, None);
        assert_eq!(games[0].start().time(), NaiveTime::default());
        assert_eq!(
            games[0].start().date(),
            NaiveDate::from_ymd_opt(2013, 10, 1).unwrap()
        );
    }

    #[test]
    fn olympic_rows_are_filtered_out() {
        let rows = [
            game_row("Winnipeg Jets", "Edmonton Oilers", "Tue Oct 1, 2013", "TBD", ""),
            game_row("Team\u{a0}Canada", "Team\u{a0}Sweden", "Wed Feb 12, 2014", "TBD", ""),
            game_row("Boston Bruins", "Ottawa Senators", "Thu Oct 3, 2013", "TBD", ""),
        ]
        .concat();
        let games = page().extract(&schedule_doc(&rows)).unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].visitor, "Winnipeg Jets");
        assert_eq!(games[1].visitor, "Boston Bruins");
    }

    #[test]
    fn header_rows_without_two_teams_are_skipped() {
        let rows = format!(
            "<tr><td>RESULTS</td></tr>{}",
            game_row("Winnipeg Jets", "Edmonton Oilers", "Tue Oct 1, 2013", "TBD", "")
        );
        let games = page().extract(&schedule_doc(&rows)).unwrap();
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn unlinked_team_names_come_from_the_div() {
        let row = r#"<tr>
<td class="date"><div class="skedStartDateSite">Tue Oct 1, 2013</div></td>
<td class="team"><div class="teamName">Winnipeg Jets</div></td>
<td class="team"><div class="teamName"><a href="/oilers">Edmonton Oilers</a></div></td>
<td class="time">TBD</td>
</tr>"#;
        let games = page().extract(&schedule_doc(row)).unwrap();
        assert_eq!(games[0].visitor, "Winnipeg Jets");
    }

    #[test]
    fn missing_schedule_table_fails_verification_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new("<html><body><p>maintenance</p></body></html>");
        let loader = PageLoader::new(fetcher, CacheStore::new(dir.path()));

        let err = page().scrape(&loader, false).unwrap_err();
        match err {
            CollectError::UnexpectedContents { message, .. } => {
                assert!(message.contains("no schedule block found"));
                assert!(message.contains("20132014"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn report_ids_come_from_recap_and_preview_links() {
        let rows = [
            game_row(
                "Winnipeg Jets",
                "Edmonton Oilers",
                "Tue Oct 1, 2013",
                &timed("3:00 PM ET"),
                r#"<a href="http://www.nhl.com/gamecenter/en/recap?id=2013020001">Recap</a>"#,
            ),
            game_row(
                "Boston Bruins",
                "Ottawa Senators",
                "Thu Oct 3, 2013",
                "TBD",
                r#"<a href="/tickets">Tickets</a><a href="http://www.nhl.com/gamecenter/en/preview?id=2013020009">Preview</a>"#,
            ),
            game_row("Calgary Flames", "Vancouver Canucks", "Sat Oct 5, 2013", "TBD", ""),
        ]
        .concat();

        let page = GameReportsPage::new(SeasonCode::new("20132014").unwrap(), SeasonType::Regular);
        let reports = page.extract(&schedule_doc(&rows)).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].report_id, "020001");
        assert_eq!(reports[0].game.visitor, "Winnipeg Jets");
        assert_eq!(reports[1].report_id, "020009");
    }

    #[test]
    fn schedule_and_reports_share_the_locator() {
        let season = SeasonCode::new("20132014").unwrap();
        let schedule = SchedulePage::new(season.clone(), SeasonType::Playoffs);
        let reports = GameReportsPage::new(season, SeasonType::Playoffs);

        assert_eq!(schedule.locator(), reports.locator());
        assert_eq!(
            schedule.locator().url,
            "http://www.nhl.com/ice/schedulebyseason.htm?season=20132014&gameType=3&team=&network=&venue="
        );
    }
}
