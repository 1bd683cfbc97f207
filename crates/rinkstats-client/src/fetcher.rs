use std::time::Duration;

use reqwest::blocking::Client;
use rinkstats_core::error::CollectError;
use rinkstats_core::traits::Fetcher;

/// Sent with every request. The site serves stripped substitute pages to
/// clients it does not recognize as browsers.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/32.0.1700.102 Safari/537.36";

/// HTTP fetcher using reqwest's blocking client.
///
/// Issues one GET per call with the fixed User-Agent and the default
/// redirect policy. Failures are surfaced to the caller, never retried.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, CollectError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CollectError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CollectError::Fetch(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> Result<String, CollectError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CollectError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Fetch(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .map_err(|e| CollectError::Fetch(format!("failed to read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_and_custom_timeouts() {
        assert!(ReqwestFetcher::new().is_ok());
        assert!(ReqwestFetcher::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
