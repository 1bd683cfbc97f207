use crate::error::CollectError;
use crate::loader::PageLoader;
use crate::models::PageLocator;

/// Fetches a raw page body from a URL.
///
/// One attempt per call; transport and HTTP-status failures surface as
/// `CollectError::Fetch` and are never retried here.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, CollectError>;
}

/// Decode strategy turning a raw payload into a navigable document.
///
/// Implementations are zero-sized type-level markers; a collector names its
/// format through the `Collector::Format` associated type.
pub trait DocumentFormat {
    type Doc;

    fn decode(url: &str, raw: &str) -> Result<Self::Doc, CollectError>;
}

/// One page collection: where to load from, how to check the page is the
/// one expected, and how to pull the record out.
///
/// `scrape` is the shared pipeline — load → decode → verify → extract — and
/// is not meant to be overridden. Verification runs before extraction, so
/// extractors may assume the document shape a successful `verify` implies.
pub trait Collector {
    type Format: DocumentFormat;
    type Record;

    /// The page this collector reads.
    fn locator(&self) -> &PageLocator;

    /// Check that the fetched document is the expected page and not a
    /// substitute (wrong season, login interstitial, empty shell). The
    /// default accepts everything; pages with a recognizable signature
    /// override it.
    fn verify(
        &self,
        _doc: &<Self::Format as DocumentFormat>::Doc,
    ) -> Result<(), CollectError> {
        Ok(())
    }

    /// Pull the record out of a verified document.
    fn extract(
        &self,
        doc: &<Self::Format as DocumentFormat>::Doc,
    ) -> Result<Self::Record, CollectError>;

    /// Run the full collection pipeline for this page.
    fn scrape<F: Fetcher>(
        &self,
        loader: &PageLoader<F>,
        use_cache: bool,
    ) -> Result<Self::Record, CollectError> {
        let url = self.locator().url.as_str();
        tracing::info!(url, "collecting page");
        let raw = loader.load(url, use_cache)?;
        let doc = Self::Format::decode(url, &raw)?;
        self.verify(&doc)?;
        self.extract(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::testutil::MockFetcher;

    /// Hands the raw payload through untouched.
    struct RawText;

    impl DocumentFormat for RawText {
        type Doc = String;

        fn decode(_url: &str, raw: &str) -> Result<String, CollectError> {
            Ok(raw.to_string())
        }
    }

    /// Counts lines; optionally insists the payload opens with "header".
    struct LineCount {
        locator: PageLocator,
        require_header: bool,
    }

    impl LineCount {
        fn new(require_header: bool) -> Self {
            LineCount {
                locator: PageLocator::new("http://example.com/lines"),
                require_header,
            }
        }
    }

    impl Collector for LineCount {
        type Format = RawText;
        type Record = usize;

        fn locator(&self) -> &PageLocator {
            &self.locator
        }

        fn verify(&self, doc: &String) -> Result<(), CollectError> {
            if self.require_header && !doc.starts_with("header") {
                return Err(CollectError::unexpected(
                    &self.locator.url,
                    "expected a header line, found none",
                ));
            }
            Ok(())
        }

        fn extract(&self, doc: &String) -> Result<usize, CollectError> {
            Ok(doc.lines().count())
        }
    }

    /// Always fails verification; extraction must never run.
    struct NeverValid {
        locator: PageLocator,
    }

    impl Collector for NeverValid {
        type Format = RawText;
        type Record = ();

        fn locator(&self) -> &PageLocator {
            &self.locator
        }

        fn verify(&self, _doc: &String) -> Result<(), CollectError> {
            Err(CollectError::unexpected(
                &self.locator.url,
                "expected the real page, found a substitute",
            ))
        }

        fn extract(&self, _doc: &String) -> Result<(), CollectError> {
            panic!("extract ran after failed verification");
        }
    }

    fn loader(dir: &tempfile::TempDir, fetcher: MockFetcher) -> PageLoader<MockFetcher> {
        PageLoader::new(fetcher, CacheStore::new(dir.path()))
    }

    #[test]
    fn scrape_runs_the_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader(&dir, MockFetcher::new("header\none\ntwo"));
        let count = LineCount::new(true).scrape(&loader, false).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn default_verify_accepts_anything() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader(&dir, MockFetcher::new("one\ntwo"));
        let count = LineCount::new(false).scrape(&loader, false).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn failed_verification_stops_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader(&dir, MockFetcher::new("whatever"));
        let collector = NeverValid {
            locator: PageLocator::new("http://example.com/substitute"),
        };
        let err = collector.scrape(&loader, false).unwrap_err();
        assert!(matches!(err, CollectError::UnexpectedContents { .. }));
    }

    #[test]
    fn fetch_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader(
            &dir,
            MockFetcher::with_error(CollectError::Fetch("connection refused".into())),
        );
        let err = LineCount::new(false).scrape(&loader, false).unwrap_err();
        assert!(matches!(err, CollectError::Fetch(_)));
    }
}
