//! Subcommand implementations.

pub mod cache;
pub mod films;
pub mod find;
pub mod page;
pub mod show;

use anyhow::Result;

use crate::cli::Commands;
use crate::config::ConfigArgs;

/// Call a function generic over [`swapi::record::Kind`] with the marker
/// matching a runtime [`swapi::ResourceKind`].
macro_rules! with_kind {
    ($kind:expr, $f:ident($($arg:expr),* $(,)?)) => {{
        use swapi::record::{Films, People, Planets, Species, Starships, Vehicles};
        match $kind {
            swapi::ResourceKind::Films => $f::<Films>($($arg),*).await,
            swapi::ResourceKind::People => $f::<People>($($arg),*).await,
            swapi::ResourceKind::Planets => $f::<Planets>($($arg),*).await,
            swapi::ResourceKind::Species => $f::<Species>($($arg),*).await,
            swapi::ResourceKind::Starships => $f::<Starships>($($arg),*).await,
            swapi::ResourceKind::Vehicles => $f::<Vehicles>($($arg),*).await,
        }
    }};
}
pub(crate) use with_kind;

pub async fn handle(cmd: Commands, config: &ConfigArgs) -> Result<()> {
    match cmd {
        Commands::Films(args) => films::run(args, config).await,
        Commands::Show(args) => show::run(args, config).await,
        Commands::Page(args) => page::run(args, config).await,
        Commands::Find(args) => find::run(args, config).await,
        Commands::Cache(cmd) => cache::handle(cmd, config),
    }
}
