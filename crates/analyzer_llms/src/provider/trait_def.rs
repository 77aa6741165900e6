use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A remote chat-completion backend.
///
/// Handlers hold an `Arc<dyn Provider>` so tests can swap in a fake.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier used in logs
    fn provider_id(&self) -> &str;

    /// Model identifier sent with requests and reported by `/health`
    fn model(&self) -> &str;

    /// Headers for a request, merged with any per-call headers
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Send one request. Resolves to `Error::Cancelled` as soon as `cancel`
    /// fires and to `Error::Timeout` once the call's deadline passes.
    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerateResponse>;
}
