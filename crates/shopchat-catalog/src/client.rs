use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

/// Read side of the commerce API, behind a trait so the pipeline and tests
/// can substitute the upstream.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the merchant's full raw product list. Any transport, auth, or
    /// decode failure propagates to the caller.
    async fn fetch_products(&self) -> Result<Vec<Value>>;
}

/// Shopify Admin REST client (HTTP direct, no SDK)
pub struct ShopifyClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ShopifyClient {
    /// Create new client authenticated with a static per-store token
    pub fn new(
        store_domain: impl Into<String>,
        access_token: &str,
        api_version: &str,
    ) -> Result<Self> {
        let store_domain = store_domain.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Shopify-Access-Token",
            HeaderValue::from_str(access_token).context("Invalid access token format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: format!("https://{}/admin/api/{}", store_domain, api_version),
            http_client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<Value>,
}

#[async_trait]
impl CatalogClient for ShopifyClient {
    async fn fetch_products(&self) -> Result<Vec<Value>> {
        let url = format!("{}/products.json", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("Catalog request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Catalog fetch failed with status {}", response.status());
        }

        let envelope: ProductsEnvelope = response
            .json()
            .await
            .context("Failed to decode catalog response")?;

        tracing::debug!(count = envelope.products.len(), "Fetched catalog");
        Ok(envelope.products)
    }
}
