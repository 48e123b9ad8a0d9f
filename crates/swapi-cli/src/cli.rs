//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{cache, films, find, page, show};
use crate::config::ConfigArgs;

/// Browse and cache the Star Wars API from the command line.
#[derive(Parser, Debug)]
#[command(name = "swapi")]
#[command(author, version = env!("SWAPI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List films, optionally searched and sorted
    Films(films::FilmsArgs),

    /// Show one film by episode number
    Show(show::ShowArgs),

    /// Fetch one listing page of any resource kind
    Page(page::PageArgs),

    /// Fetch every record of a kind, or the first page of each search
    Find(find::FindArgs),

    /// Inspect or clear the response cache
    Cache(cache::CacheCommand),
}
