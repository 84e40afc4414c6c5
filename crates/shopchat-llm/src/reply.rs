use serde::{Deserialize, Serialize};

/// The structured recommendation the model is instructed to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Missing ids read as the ambiguous-query shape (empty list); a
    /// missing message makes the whole reply partial and it degrades to
    /// raw text instead.
    #[serde(default)]
    pub product_ids: Vec<u64>,
    pub message: String,
}

/// Outcome of parsing a raw model reply.
///
/// Parsing is best-effort and never an error: a reply that is not the
/// expected two-field JSON comes back as `Unstructured` carrying the raw
/// text verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Structured(Recommendation),
    Unstructured(String),
}

pub fn parse_reply(raw: &str) -> ModelReply {
    match serde_json::from_str(strip_code_fences(raw)) {
        Ok(recommendation) => ModelReply::Structured(recommendation),
        Err(_) => ModelReply::Unstructured(raw.to_string()),
    }
}

/// Remove surrounding ``` fences (with an optional language tag) that
/// models habitually wrap JSON replies in.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
