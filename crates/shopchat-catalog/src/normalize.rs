use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::summary::{ProductSummary, CURRENCY};

// Literal tag-pattern removal, not HTML parsing. Entities stay as-is.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Flatten one raw catalog record into a `ProductSummary`.
///
/// Total: missing or malformed fields degrade to defaults (price 0,
/// compareAtPrice absent, image empty) instead of failing.
pub fn normalize(raw: &Value, store_domain: &str) -> ProductSummary {
    let handle = str_field(raw, "handle");

    let first_variant = raw["variants"].get(0);
    let price = first_variant.map(|v| parse_price(&v["price"])).unwrap_or(0.0);
    let compare_at_price = first_variant.and_then(|v| opt_price(&v["compare_at_price"]));

    let image = raw["images"]
        .get(0)
        .and_then(|img| img["src"].as_str())
        .or_else(|| raw["image"]["src"].as_str())
        .unwrap_or("")
        .to_string();

    ProductSummary {
        id: raw["id"].as_u64().unwrap_or(0),
        title: str_field(raw, "title"),
        description: HTML_TAG
            .replace_all(&str_field(raw, "body_html"), "")
            .into_owned(),
        tags: str_field(raw, "tags"),
        price,
        compare_at_price,
        currency: CURRENCY.to_string(),
        image,
        url: format!("https://{}/products/{}", store_domain, handle),
        handle,
    }
}

fn str_field(raw: &Value, key: &str) -> String {
    raw[key].as_str().unwrap_or_default().to_string()
}

/// Shopify quotes prices as strings; tolerate plain numbers too.
fn opt_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_price(value: &Value) -> f64 {
    opt_price(value).unwrap_or(0.0)
}
