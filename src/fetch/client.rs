use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Adapters only ever talk to the network
/// through this trait, which lets auth wrappers and canned test clients
/// slot in underneath them.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
