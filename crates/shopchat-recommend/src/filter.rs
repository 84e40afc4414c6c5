use once_cell::sync::Lazy;
use regex::Regex;

use shopchat_catalog::ProductSummary;

/// Category vocabulary, scanned in this exact order; the first keyword
/// contained in the message wins and the rest are ignored. The order is
/// load-bearing: "shoe" beats "sneaker" whenever both appear, and "shoes"
/// can never win outright because "shoe" matches first as a substring.
pub const CATEGORY_KEYWORDS: [&str; 12] = [
    "shoe", "shoes", "shirt", "hoodie", "bag", "backpack", "dress", "jacket", "watch", "sneaker",
    "pants", "jeans",
];

// "under 5000", "below 10k", "less than 3k". First match wins; no currency
// symbols, no "over"/"between" phrasing.
static BUDGET_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:under|below|less than)\s*(\d+)\s*(k)?").unwrap());

/// Optional narrowing derived from a single user message; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub max_price: Option<f64>,
    pub category: Option<&'static str>,
}

/// Scan free text for a budget phrase and a category keyword. Absence of a
/// match simply leaves the field unset; there are no error cases.
pub fn extract_filters(text: &str) -> Filters {
    let max_price = BUDGET_PHRASE.captures(text).and_then(|caps| {
        let amount: f64 = caps[1].parse().ok()?;
        Some(if caps.get(2).is_some() {
            amount * 1000.0
        } else {
            amount
        })
    });

    let lowered = text.to_lowercase();
    let category = CATEGORY_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword));

    Filters { max_price, category }
}

/// A product survives iff (no maxPrice or price <= maxPrice) AND (no
/// category or case-insensitive substring of title+description+tags).
pub fn apply_filters(products: &[ProductSummary], filters: &Filters) -> Vec<ProductSummary> {
    products
        .iter()
        .filter(|product| {
            let within_budget = filters.max_price.map_or(true, |max| product.price <= max);
            let in_category = filters.category.map_or(true, |category| {
                format!(
                    "{} {} {}",
                    product.title, product.description, product.tags
                )
                .to_lowercase()
                .contains(category)
            });
            within_budget && in_category
        })
        .cloned()
        .collect()
}
