//! Film listing command implementation.

use anyhow::{Result, bail};
use clap::Args;

use swapi::{FilmBrowser, SortKey};

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct FilmsArgs {
    /// Search text; matching titles are prefixed with their episode
    #[arg(long, short)]
    pub search: Option<String>,

    /// Sort order (title or year)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Print raw JSON, one film per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: FilmsArgs, config: &ConfigArgs) -> Result<()> {
    let catalog = config.catalog()?;
    let mut browser = FilmBrowser::new(catalog.films());

    browser
        .set_search_text(args.search.unwrap_or_default())
        .await;
    if let Some(error) = browser.error() {
        bail!("{}", error);
    }
    if let Some(key) = args.sort {
        browser.sort_by(key);
    }

    let films = browser.films().unwrap_or_default();
    if films.is_empty() {
        output::note("No films found.");
        return Ok(());
    }

    for film in films {
        if args.json {
            output::json(film)?;
        } else {
            output::film_line(film);
        }
    }

    Ok(())
}
