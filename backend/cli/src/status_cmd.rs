//! CLI Status Command
//!
//! Queries a running gateway's health endpoint.

use anyhow::Result;

use crate::output::note_warn;

pub async fn run(host: &str, port: u16) -> Result<()> {
    // A wildcard bind address is not something to connect to.
    let host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    let url = format!("http://{host}:{port}/api/health");

    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            note_warn(&format!("HireForge is not running at {host}:{port}"));
        }
    }
    Ok(())
}
