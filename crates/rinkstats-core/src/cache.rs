use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CollectError;
use crate::util::compute_hash;

/// On-disk page cache keyed by URL digest.
///
/// Each payload lives in a single file under the configured root directory,
/// named by the SHA-256 hex digest of its URL. There is no eviction, no TTL
/// and no freshness check; a cached page is served as-is until the file is
/// removed by hand.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// A store rooted at `root`. The directory is created lazily on the
    /// first `write`, never here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CacheStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a URL's payload is stored at. Pure function of the URL;
    /// the `.html` extension is fixed regardless of payload type.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(format!("{}.html", compute_hash(url)))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.path_for(url).is_file()
    }

    pub fn read(&self, url: &str) -> Result<String, CollectError> {
        Ok(fs::read_to_string(self.path_for(url))?)
    }

    pub fn write(&self, url: &str, body: &str) -> Result<(), CollectError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(url);
        fs::write(&path, body)?;
        tracing::debug!(url, path = %path.display(), "stored page in cache");
        Ok(())
    }
}
