use thiserror::Error;

/// Error taxonomy for the collection pipeline.
///
/// Nothing here is retried or recovered internally: every variant
/// propagates to the caller, which decides on logging, retry, or abort.
#[derive(Error, Debug)]
pub enum CollectError {
    /// A season or season-type argument was rejected before any network
    /// call was made.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure or non-success HTTP status while fetching a page.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The page was retrieved and decoded, but its contents do not carry
    /// the landmarks expected for this resource. The upstream site
    /// silently serves substitute pages (error pages, olympic schedule
    /// noise, revised markup) that must not be mistaken for data.
    #[error("unexpected contents at {url}: {message}")]
    UnexpectedContents { url: String, message: String },

    /// A structural landmark assumed by extraction was missing. Extraction
    /// runs after verification, so this points at the selector logic, not
    /// at the page.
    #[error("extraction failed at {url}: {message}")]
    Extraction { url: String, message: String },

    /// The payload could not be decoded as JSON.
    #[error("failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Cache file could not be read or written.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectError {
    /// Shorthand for an [`UnexpectedContents`](Self::UnexpectedContents)
    /// error, used by `verify` implementations.
    pub fn unexpected(url: impl Into<String>, message: impl Into<String>) -> Self {
        CollectError::UnexpectedContents {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`Extraction`](Self::Extraction) error, used by
    /// `extract` implementations when a landmark is absent.
    pub fn extraction(url: impl Into<String>, message: impl Into<String>) -> Self {
        CollectError::Extraction {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors raised before the network was touched.
    pub fn is_config(&self) -> bool {
        matches!(self, CollectError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_url_and_message() {
        let err = CollectError::unexpected("http://example.com/a", "expected 2013-2014, found 500");
        let text = err.to_string();
        assert!(text.contains("http://example.com/a"));
        assert!(text.contains("expected 2013-2014"));
    }

    #[test]
    fn config_errors_are_flagged() {
        assert!(CollectError::Config("bad season".into()).is_config());
        assert!(!CollectError::Fetch("HTTP 500".into()).is_config());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CollectError = io.into();
        assert!(matches!(err, CollectError::Io(_)));
    }
}
