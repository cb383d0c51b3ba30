//! REST helpers for talking to the host server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::BackendConfig;

pub const CONFIG_ENDPOINT: &str = "/api/config";

#[cfg(any(test, feature = "hydrate"))]
fn config_request_failed_message(status: u16) -> String {
    format!("config request failed: {status}")
}

/// Fetch the backend settings from `GET /api/config`.
///
/// # Errors
///
/// Returns an error string if the request fails, the server responds with a
/// non-OK status, or the body is not a `BackendConfig`.
pub async fn fetch_backend_config() -> Result<BackendConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(config_request_failed_message(resp.status()));
        }
        resp.json::<BackendConfig>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
