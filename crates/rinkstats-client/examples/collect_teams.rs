/// Smoke-test for the page collectors.
///
/// Fetches the public team listing, caching the page under
/// `./.rinkstats-cache` so a second run is served from disk.
///
/// Run with:
///   cargo run --example collect_teams
use rinkstats_client::{ReqwestFetcher, TeamsPage};
use rinkstats_core::{CacheStore, Collector, PageLoader};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let fetcher = ReqwestFetcher::new()?;
    let loader = PageLoader::new(fetcher, CacheStore::new(".rinkstats-cache"));

    println!("Fetching the team listing…");
    let teams = TeamsPage::new().scrape(&loader, true)?;

    assert!(!teams.is_empty(), "team listing came back empty");
    println!(
        "OK — collected {} teams, cached under {}",
        teams.len(),
        loader.cache().root().display()
    );
    println!("{}", serde_json::to_string_pretty(&teams)?);
    Ok(())
}
