//! Listing page command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use swapi::record::Kind;
use swapi::{Catalog, ResourceKind};

use super::with_kind;
use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Resource kind (films, people, planets, species, starships, vehicles)
    pub kind: ResourceKind,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Search text
    #[arg(long, short)]
    pub search: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: PageArgs, config: &ConfigArgs) -> Result<()> {
    let catalog = config.catalog()?;
    with_kind!(args.kind, print_page(&catalog, &args))
}

async fn print_page<K: Kind>(catalog: &Catalog, args: &PageArgs) -> Result<()> {
    let page = catalog
        .endpoint::<K>()
        .get_page(args.page, args.search.as_deref())
        .await
        .with_context(|| format!("Failed to fetch {} page {}", K::KIND, args.page))?;

    for record in &page.results {
        if args.pretty {
            output::json_pretty(record)?;
        } else {
            output::json(record)?;
        }
    }

    eprintln!();
    eprintln!(
        "{}: {} ({} on this page)",
        "Total".dimmed(),
        page.count,
        page.results.len()
    );
    if let Some(next) = &page.next {
        eprintln!("{}: {}", "Next page".dimmed(), next);
    }

    Ok(())
}
