use crate::cache::CacheStore;
use crate::error::CollectError;
use crate::traits::Fetcher;

/// Fetches pages, optionally through the on-disk cache.
///
/// Generic over the fetcher trait for dependency injection, so collector
/// tests run against canned bodies without real HTTP.
pub struct PageLoader<F: Fetcher> {
    fetcher: F,
    cache: CacheStore,
}

impl<F: Fetcher> PageLoader<F> {
    pub fn new(fetcher: F, cache: CacheStore) -> Self {
        PageLoader { fetcher, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Return the body of `url`.
    ///
    /// With `use_cache` off, every call goes to the network and the cache is
    /// never touched. With it on, a hit is served from disk without any
    /// freshness check, and a miss is fetched then stored before returning.
    pub fn load(&self, url: &str, use_cache: bool) -> Result<String, CollectError> {
        if !use_cache {
            return self.fetcher.fetch(url);
        }
        if self.cache.contains(url) {
            tracing::debug!(url, "serving page from cache");
            return self.cache.read(url);
        }
        let body = self.fetcher.fetch(url)?;
        self.cache.write(url, &body)?;
        Ok(body)
    }
}
