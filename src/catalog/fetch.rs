//! Client side of the load cycle: fetch the directory from a running proxy.

use serde_json::Value;

use crate::catalog::state::DirectoryState;
use crate::http::QUERY_PATH;

/// Prefix of every message shown in the error panel.
pub const FETCH_FAILED: &str = "Failed to fetch tools";

/// Fetch the raw query response from the proxy at `base_url`.
///
/// Non-2xx answers, network failures and non-JSON bodies all become the
/// message shown in the error panel.
pub async fn fetch_directory(client: &reqwest::Client, base_url: &str) -> Result<Value, String> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), QUERY_PATH);
    let res = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("{}: {}", FETCH_FAILED, e))?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "Directory fetch failed");
        return Err(format!("{}: {} {}", FETCH_FAILED, status.as_u16(), text));
    }

    res.json::<Value>()
        .await
        .map_err(|e| format!("{}: {}", FETCH_FAILED, e))
}

/// Run one load cycle from `Loading`.
pub async fn load(client: &reqwest::Client, base_url: &str) -> DirectoryState {
    match fetch_directory(client, base_url).await {
        Ok(body) => DirectoryState::Loading.fetch_succeeded(&body),
        Err(message) => DirectoryState::Loading.fetch_failed(message),
    }
}
