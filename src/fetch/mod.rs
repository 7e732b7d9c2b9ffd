mod basic;
mod client;
pub mod auth;
#[cfg(test)]
pub(crate) mod testing;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Parses a service base URL, making sure it ends in `/` so that
/// [`Url::join`] appends to its path instead of replacing the last segment.
pub fn base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("invalid base URL '{raw}'"))
}

/// Issues a GET for `url` and decodes the JSON body into `T`.
///
/// Non-2xx statuses are turned into errors carrying the status and body.
pub async fn fetch_json<C, T>(client: &C, url: Url) -> Result<T>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    debug!(url = %url, "GET");
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("Failed to send request to {}", url.path()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("{} returned status {}: {}", url.path(), status, body));
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse response from {}", url.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::CannedClient;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        name: String,
    }

    #[test]
    fn test_base_url_keeps_path() {
        let base = base_url("https://example.test/nominatim").unwrap();
        assert_eq!(base.join("search").unwrap().as_str(), "https://example.test/nominatim/search");
        let base = base_url("https://example.test/").unwrap();
        assert_eq!(
            base.join("v3/locations").unwrap().as_str(),
            "https://example.test/v3/locations"
        );
        assert!(base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_body() {
        let client = CannedClient::new().respond("https://example.test/a", 200, r#"{"name":"x"}"#);
        let payload: Payload = fetch_json(&client, "https://example.test/a?q=1".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(payload.name, "x");
    }

    #[tokio::test]
    async fn test_fetch_json_reports_status() {
        let client = CannedClient::new().respond("https://example.test/a", 401, "unauthorized");
        let err = fetch_json::<_, Payload>(&client, "https://example.test/a".parse().unwrap())
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"), "{msg}");
        assert!(msg.contains("unauthorized"), "{msg}");
    }

    #[tokio::test]
    async fn test_fetch_json_rejects_garbage() {
        let client = CannedClient::new().respond("https://example.test/a", 200, "<html>");
        let url = "https://example.test/a".parse().unwrap();
        let result = fetch_json::<_, Payload>(&client, url).await;
        assert!(result.is_err());
    }
}
