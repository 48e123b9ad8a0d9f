//! Find command implementation.

use anyhow::{Context, Result};
use clap::Args;

use swapi::record::Kind;
use swapi::{Catalog, ResourceKind};

use super::with_kind;
use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Resource kind (films, people, planets, species, starships, vehicles)
    pub kind: ResourceKind,

    /// Search text; repeat to combine the first page of several searches
    #[arg(long, short)]
    pub search: Vec<String>,

    /// Reference path to resolve on every record; may be repeated
    #[arg(long, short)]
    pub populate: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: FindArgs, config: &ConfigArgs) -> Result<()> {
    let catalog = config.catalog()?;
    with_kind!(args.kind, find(&catalog, &args))
}

async fn find<K: Kind>(catalog: &Catalog, args: &FindArgs) -> Result<()> {
    let endpoint = catalog.endpoint::<K>();

    let mut found = if args.search.is_empty() {
        endpoint.find().await
    } else {
        endpoint.find_by_search(&args.search).await
    }
    .with_context(|| format!("Failed to fetch {}", K::KIND))?;

    for path in &args.populate {
        found
            .populate_all(path)
            .await
            .with_context(|| format!("Failed to populate '{}'", path))?;
    }

    if found.is_empty() {
        output::note("No records found.");
        return Ok(());
    }

    for resource in &found {
        if args.pretty {
            output::json_pretty(resource.value())?;
        } else {
            output::json(resource.value())?;
        }
    }

    Ok(())
}
