//! Show film command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use swapi::browser::episode_of;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Episode number
    pub episode: i64,

    /// Reference path to resolve (e.g. characters.homeworld); may be repeated
    #[arg(long, short)]
    pub populate: Vec<String>,

    /// Print the film as pretty JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, config: &ConfigArgs) -> Result<()> {
    let catalog = config.catalog()?;

    let found = catalog
        .films()
        .find_where(|film| episode_of(film) == Some(args.episode))
        .await
        .context("Failed to fetch films")?;

    let mut film = found
        .into_iter()
        .next()
        .with_context(|| format!("No film with episode {}", args.episode))?;

    for path in &args.populate {
        film.populate(path)
            .await
            .with_context(|| format!("Failed to populate '{}'", path))?;
    }

    if args.json {
        return output::json_pretty(film.value());
    }

    let value = film.value();
    output::field("Title", film.label().unwrap_or("?"));
    output::field("Episode", &args.episode.to_string());
    for (label, key) in [
        ("Director", "director"),
        ("Producer", "producer"),
        ("Released", "release_date"),
    ] {
        if let Some(text) = value[key].as_str() {
            output::field(label, text);
        }
    }
    if let Some(crawl) = value["opening_crawl"].as_str() {
        println!();
        println!("{}", crawl.italic());
    }

    for path in &args.populate {
        let field = path.split('.').next().unwrap_or(path);
        let names = labels(&value[field]);
        if !names.is_empty() {
            println!();
            output::field(field, &names.join(", "));
        }
    }

    Ok(())
}

/// Names of populated records in a reference field.
fn labels(field: &Value) -> Vec<&str> {
    fn label(record: &Value) -> Option<&str> {
        record
            .get("name")
            .or_else(|| record.get("title"))
            .and_then(Value::as_str)
    }

    match field {
        Value::Array(items) => items.iter().filter_map(label).collect(),
        Value::Object(_) => label(field).into_iter().collect(),
        _ => Vec::new(),
    }
}
