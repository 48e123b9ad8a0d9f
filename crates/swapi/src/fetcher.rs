//! Cache-backed fetcher.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use swapi_core::error::{CacheError, Error};
use swapi_core::types::secure_url;
use swapi_core::{ApiRoot, Cache, Result, Transport};

/// Namespace prepended to every cache key.
pub const CACHE_PREFIX: &str = "swCache";

/// Fetches JSON documents, memoizing every successful response in a
/// [`Cache`].
///
/// Once a URL has been fetched successfully it is never requested from the
/// network again for the lifetime of the cache. Failed requests leave the
/// cache untouched.
///
/// Concurrent misses on the same URL are not de-duplicated: both go to the
/// network and the last write wins.
#[derive(Clone)]
pub struct Fetcher {
    cache: Arc<dyn Cache>,
    transport: Arc<dyn Transport>,
    api: Option<ApiRoot>,
}

impl Fetcher {
    /// Create a fetcher over the given cache and transport.
    pub fn new(cache: Arc<dyn Cache>, transport: Arc<dyn Transport>) -> Self {
        Self {
            cache,
            transport,
            api: None,
        }
    }

    /// Bind the fetcher to the API root its records are served from.
    ///
    /// References are then resolved with [`ApiRoot::reference_url`].
    pub fn with_api_root(mut self, api: ApiRoot) -> Self {
        self.api = Some(api);
        self
    }

    /// Parse a reference URL found in a fetched record.
    ///
    /// `http` references are upgraded to `https`, unless they point at the
    /// bound API root's own plain-HTTP origin.
    pub fn reference_url(&self, raw: &str) -> Option<Url> {
        match &self.api {
            Some(api) => api.reference_url(raw),
            None => secure_url(raw),
        }
    }

    /// Returns the cache key for a URL: `swCache.<url>`.
    pub fn cache_key(url: &Url) -> String {
        format!("{}.{}", CACHE_PREFIX, url)
    }

    /// Returns the cache backing this fetcher.
    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    /// Fetch `url`, answering from the cache when possible.
    #[instrument(skip(self), fields(%url))]
    pub async fn request(&self, url: &Url) -> Result<Value> {
        let key = Self::cache_key(url);

        if let Some(cached) = self.cache.get(&key)? {
            match serde_json::from_str(&cached) {
                Ok(value) => {
                    debug!("cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(error = %e, "unreadable cache entry, refetching"),
            }
        }

        debug!("cache miss");
        let value = self.transport.get_json(url).await?;

        let text = serde_json::to_string(&value).map_err(|e| {
            Error::Cache(CacheError::Corrupt {
                message: e.to_string(),
            })
        })?;
        self.cache.set(&key, &text)?;

        Ok(value)
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
