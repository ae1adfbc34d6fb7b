use anyhow::{bail, Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::json;
use tracing::debug;

pub const GET_FILE_URL: &str = "https://design.penpot.app/api/rpc/command/get-file";

/// Downloads a file through Penpot's RPC API and returns the raw JSON body.
pub fn fetch_file(file_id: &str, access_token: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("penport/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    debug!(file_id, url = GET_FILE_URL, "requesting file");
    let response = client
        .post(GET_FILE_URL)
        .header(AUTHORIZATION, format!("Token {access_token}"))
        .header(ACCEPT, "application/json")
        .json(&json!({ "id": file_id }))
        .send()
        .context("Failed to reach Penpot")?;

    let status = response.status();
    if !status.is_success() {
        bail!(
            "Failed to fetch file: {}",
            status.canonical_reason().unwrap_or(status.as_str())
        );
    }
    response.text().context("Failed to read Penpot response")
}
