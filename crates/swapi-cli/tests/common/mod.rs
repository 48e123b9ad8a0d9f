use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::MockServer;

/// Run the CLI against a mock API root with an isolated cache directory.
pub fn run_cli_with_env(args: &[&str], cache_dir: &Path, api_root: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swapi"));
    cmd.args(args);
    cmd.env("SWAPI_ROOT", api_root);
    cmd.env("SWAPI_CACHE_DIR", cache_dir);
    cmd.env_remove("SWAPI_TIMEOUT");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_with_env_success(args: &[&str], cache_dir: &Path, api_root: &str) -> String {
    let output = run_cli_with_env(args, cache_dir, api_root);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// API root of a mock server.
pub fn api_root(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

pub fn film(server: &MockServer, episode: u32, title: &str, released: &str) -> Value {
    json!({
        "title": title,
        "episode_id": episode,
        "director": "George Lucas",
        "release_date": released,
        "characters": [format!("{}/api/people/1/", server.uri())],
        "url": format!("{}/api/films/{}/", server.uri(), episode),
    })
}

pub fn page(results: Vec<Value>) -> Value {
    json!({ "count": results.len(), "next": null, "previous": null, "results": results })
}
