use serde::{Deserialize, Serialize};

/// Currency every storefront price is quoted in.
pub const CURRENCY: &str = "INR";

/// Flat per-product shape derived fresh from the raw catalog on every
/// request; never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,
    pub currency: String,
    pub image: String,
    pub url: String,
    pub handle: String,
}
