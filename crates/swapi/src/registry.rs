//! Binds each resource kind to its endpoint below the API root.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use swapi_core::record::{Films, Kind, People, Planets, Species, Starships, Vehicles};
use swapi_core::{ApiRoot, Cache, MemoryCache, Result, Transport};
use swapi_file::FileCache;
use swapi_http::{HttpConfig, HttpTransport};

use crate::collection::Endpoint;
use crate::fetcher::Fetcher;

/// Entry point to the API: one [`Endpoint`] per resource kind, all sharing
/// a single [`Fetcher`] and therefore a single cache.
///
/// # Example
///
/// ```no_run
/// use swapi::Catalog;
///
/// # async fn example() -> Result<(), swapi::Error> {
/// let catalog = Catalog::builder().cache_dir("/tmp/swapi")?.build()?;
/// let films = catalog.films().find().await?;
/// for film in &films {
///     println!("{}", film.label().unwrap_or("?"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    api: ApiRoot,
    fetcher: Fetcher,
}

impl Catalog {
    /// Create a catalog over an existing fetcher.
    ///
    /// The fetcher is bound to `api`, so references on a plain-HTTP loopback
    /// root stay on that root.
    pub fn new(api: ApiRoot, fetcher: Fetcher) -> Self {
        let fetcher = fetcher.with_api_root(api.clone());
        Self { api, fetcher }
    }

    /// Start configuring a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Returns the API root.
    pub fn api_root(&self) -> &ApiRoot {
        &self.api
    }

    /// Returns the shared fetcher.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Returns the endpoint of kind `K`, rooted at `<api root>/<kind>/`.
    pub fn endpoint<K: Kind>(&self) -> Endpoint<K> {
        Endpoint::new(self.api.collection_url(K::KIND), self.fetcher.clone())
    }

    pub fn films(&self) -> Endpoint<Films> {
        self.endpoint()
    }

    pub fn people(&self) -> Endpoint<People> {
        self.endpoint()
    }

    pub fn planets(&self) -> Endpoint<Planets> {
        self.endpoint()
    }

    pub fn species(&self) -> Endpoint<Species> {
        self.endpoint()
    }

    pub fn starships(&self) -> Endpoint<Starships> {
        self.endpoint()
    }

    pub fn vehicles(&self) -> Endpoint<Vehicles> {
        self.endpoint()
    }
}

/// Builder for [`Catalog`].
///
/// Defaults: the public API root, an in-memory cache, and an HTTP transport
/// with the default timeout.
#[derive(Default)]
pub struct CatalogBuilder {
    api: ApiRoot,
    cache: Option<Arc<dyn Cache>>,
    transport: Option<Arc<dyn Transport>>,
    http: HttpConfig,
}

impl CatalogBuilder {
    /// Use a different API root.
    pub fn api_root(mut self, api: ApiRoot) -> Self {
        self.api = api;
        self
    }

    /// Use the given cache.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Persist responses in a [`FileCache`] under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be opened.
    pub fn cache_dir(self, dir: impl AsRef<Path>) -> Result<Self> {
        let cache = FileCache::open(dir)?;
        Ok(self.cache(Arc::new(cache)))
    }

    /// Use the given transport instead of HTTP.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Configure the HTTP transport.
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Build the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(self) -> Result<Catalog> {
        let cache = match self.cache {
            Some(cache) => cache,
            None => Arc::new(MemoryCache::new()),
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_config(&self.http)?),
        };

        debug!(api = %self.api, "catalog ready");
        Ok(Catalog::new(self.api, Fetcher::new(cache, transport)))
    }
}
