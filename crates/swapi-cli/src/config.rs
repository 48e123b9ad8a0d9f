//! Connection and cache settings shared by every command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;
use tracing::debug;

use swapi::{ApiRoot, Catalog, HttpConfig, MemoryCache};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// API root URL
    #[arg(long, env = "SWAPI_ROOT", default_value = swapi::types::DEFAULT_API_ROOT, global = true)]
    pub api_root: String,

    /// Directory of the response cache
    #[arg(long, env = "SWAPI_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Keep responses in memory only
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, env = "SWAPI_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,
}

impl ConfigArgs {
    /// Resolve the cache directory: `--cache-dir`, else the platform cache
    /// directory for `swapi`.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }

        let dirs =
            ProjectDirs::from("", "", "swapi").context("Could not determine cache directory")?;
        Ok(dirs.cache_dir().to_path_buf())
    }

    /// Build a catalog from these settings.
    pub fn catalog(&self) -> Result<Catalog> {
        let api = ApiRoot::new(&self.api_root).context("Invalid API root")?;

        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let http = HttpConfig::default().timeout(timeout);

        let builder = Catalog::builder().api_root(api).http_config(http);
        let builder = if self.no_cache {
            builder.cache(Arc::new(MemoryCache::new()))
        } else {
            let dir = self.cache_dir()?;
            debug!(dir = %dir.display(), "using file cache");
            builder
                .cache_dir(&dir)
                .with_context(|| format!("Failed to open cache at {}", dir.display()))?
        };

        builder.build().context("Failed to build client")
    }
}
