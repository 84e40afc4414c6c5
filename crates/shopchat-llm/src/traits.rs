use anyhow::Result;
use async_trait::async_trait;

/// Text-in, text-out seam over the generative-language API.
///
/// The reply is free text that is expected, but not guaranteed, to be the
/// structured recommendation JSON; see [`crate::reply::parse_reply`].
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
