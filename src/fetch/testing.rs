//! Canned-response client for exercising adapters without a network.

use super::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Mutex;

/// What the client saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: reqwest::Url,
    pub headers: HeaderMap,
}

/// Answers requests by matching the URL without its query string.
/// Unknown URLs get a 404.
#[derive(Default)]
pub struct CannedClient {
    routes: Vec<(String, u16, String)>,
    seen: Mutex<Vec<RecordedRequest>>,
}

impl CannedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.push((url.to_string(), status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for CannedClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.seen.lock().unwrap().push(RecordedRequest {
            url: req.url().clone(),
            headers: req.headers().clone(),
        });

        let mut bare = req.url().clone();
        bare.set_query(None);

        let (status, body) = self
            .routes
            .iter()
            .find(|(url, _, _)| url == bare.as_str())
            .map(|(_, status, body)| (*status, body.clone()))
            .unwrap_or((404, String::new()));

        let resp = http::Response::builder()
            .status(status)
            .body(body)
            .unwrap();
        Ok(reqwest::Response::from(resp))
    }
}
