use rinkstats_core::error::CollectError;
use rinkstats_core::traits::DocumentFormat;
use scraper::Html;

/// HTML pages decoded into a `scraper` DOM tree.
///
/// Parsing is lenient and never fails; a garbage payload surfaces later as
/// failed verification or extraction, not here.
pub struct HtmlPage;

impl DocumentFormat for HtmlPage {
    type Doc = Html;

    fn decode(_url: &str, raw: &str) -> Result<Html, CollectError> {
        Ok(Html::parse_document(raw))
    }
}

/// JSON feeds decoded with `serde_json` into a generic value tree.
pub struct JsonDocument;

impl DocumentFormat for JsonDocument {
    type Doc = serde_json::Value;

    fn decode(url: &str, raw: &str) -> Result<serde_json::Value, CollectError> {
        serde_json::from_str(raw).map_err(|source| CollectError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_decode_is_lenient() {
        let doc = HtmlPage::decode("http://example.com", "<p>unclosed").unwrap();
        assert!(doc.root_element().html().contains("unclosed"));
    }

    #[test]
    fn json_decode_failure_carries_the_url() {
        let err = JsonDocument::decode("http://live.nhl.com/feed.json", "not json").unwrap_err();
        match err {
            CollectError::Decode { url, .. } => assert_eq!(url, "http://live.nhl.com/feed.json"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
