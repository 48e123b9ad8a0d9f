//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one film as a listing line: `Episode 4  A New Hope  (1977-05-25)`.
pub fn film_line(film: &Value) {
    let episode = match &film["episode_id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let title = film["title"].as_str().unwrap_or("?");
    let released = film["release_date"].as_str().unwrap_or("unknown");

    println!(
        "{}  {}  {}",
        format!("Episode {}", episode).dimmed(),
        title.bold(),
        format!("({})", released).dimmed()
    );
}
