//! Cache maintenance commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use swapi::FileCache;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Print the cache directory
    Path,

    /// Remove every cached response
    Clear,
}

pub fn handle(cmd: CacheCommand, config: &ConfigArgs) -> Result<()> {
    let dir = config.cache_dir()?;

    match cmd.command {
        CacheSubcommand::Path => {
            println!("{}", dir.display());
        }
        CacheSubcommand::Clear => {
            let cache = FileCache::open(&dir)
                .with_context(|| format!("Failed to open cache at {}", dir.display()))?;
            let removed = cache.clear().context("Failed to clear cache")?;
            output::success(&format!("Removed {} cached responses", removed));
        }
    }

    Ok(())
}
