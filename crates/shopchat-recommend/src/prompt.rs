use serde::Serialize;

use shopchat_catalog::ProductSummary;
use shopchat_session::ChatMessage;

/// How many trailing history messages the prompt carries.
pub const HISTORY_WINDOW: usize = 6;
/// How many candidate products the model sees.
pub const MAX_CANDIDATES: usize = 15;
/// Per-candidate description cap, in characters.
pub const DESCRIPTION_CAP: usize = 150;
/// Upper bound on recommended products per reply.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// What each candidate is reduced to before serialization into the prompt.
#[derive(Debug, Serialize)]
struct Candidate<'a> {
    id: u64,
    title: &'a str,
    description: String,
    price: f64,
    tags: &'a str,
}

/// Assemble the bounded prompt: recent history (role-prefixed), the literal
/// current query, the trimmed candidate list as JSON, and the reply-shape
/// instructions.
pub fn build_prompt(history: &[ChatMessage], query: &str, candidates: &[ProductSummary]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let conversation = history[start..]
        .iter()
        .map(|message| format!("{}: {}", message.role(), message.text()))
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed: Vec<Candidate> = candidates
        .iter()
        .take(MAX_CANDIDATES)
        .map(|product| Candidate {
            id: product.id,
            title: &product.title,
            description: product.description.chars().take(DESCRIPTION_CAP).collect(),
            price: product.price,
            tags: &product.tags,
        })
        .collect();
    let catalog_json = serde_json::to_string(&trimmed).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a shopping assistant for an online store.\n\
         Conversation so far:\n{conversation}\n\n\
         Current query: {query}\n\n\
         Candidate products (JSON):\n{catalog_json}\n\n\
         Recommend at most {MAX_RECOMMENDATIONS} products from the candidates.\n\
         Reply with JSON only, in exactly one of these shapes:\n\
         {{\"productIds\": [<id>, ...], \"message\": \"<short recommendation>\"}}\n\
         or, if the query is too ambiguous to recommend anything:\n\
         {{\"productIds\": [], \"message\": \"<clarifying question>\"}}"
    )
}
