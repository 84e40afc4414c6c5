use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use shopchat_catalog::{normalize, CatalogClient, ProductSummary};
use shopchat_llm::{parse_reply, GenerativeClient, ModelReply, Recommendation};
use shopchat_session::{ChatMessage, SessionStore};

use crate::filter::{apply_filters, extract_filters};
use crate::prompt::{build_prompt, MAX_RECOMMENDATIONS};

/// Result of one chat turn, before HTTP shaping.
#[derive(Debug)]
pub struct ChatOutcome {
    pub message: String,
    pub products: Vec<ProductSummary>,
}

/// Composition root for one chat turn: session bookkeeping, catalog
/// narrowing, model invocation, and id resolution run as a strict pipeline
/// with no retries and no partial results.
///
/// The store mutex is held per operation, not for the whole turn, so two
/// in-flight turns on the same session id still interleave between the two
/// append points (last write wins) — that race is part of the contract.
pub struct Recommender {
    store: Arc<Mutex<SessionStore>>,
    catalog: Arc<dyn CatalogClient>,
    llm: Arc<dyn GenerativeClient>,
    store_domain: String,
}

impl Recommender {
    pub fn new(
        store: Arc<Mutex<SessionStore>>,
        catalog: Arc<dyn CatalogClient>,
        llm: Arc<dyn GenerativeClient>,
        store_domain: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            llm,
            store_domain: store_domain.into(),
        }
    }

    pub async fn chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome> {
        // Record the user turn before anything upstream can fail.
        let history = {
            let mut store = self.store.lock().await;
            store.append(session_id, ChatMessage::user(message));
            store.persist().context("Failed to persist session")?;
            store.history(session_id).to_vec()
        };

        // Full catalog, normalized fresh for this turn.
        let raw_products = self.catalog.fetch_products().await?;
        let products: Vec<ProductSummary> = raw_products
            .iter()
            .map(|raw| normalize(raw, &self.store_domain))
            .collect();

        // Narrow by the message's filters; an empty result falls back to
        // the whole catalog rather than an empty prompt.
        let filters = extract_filters(message);
        let mut candidates = apply_filters(&products, &filters);
        if candidates.is_empty() {
            tracing::debug!(?filters, "Filters matched nothing, using full catalog");
            candidates = products;
        }

        let prompt = build_prompt(&history, message, &candidates);
        let raw_reply = self.llm.generate(&prompt).await?;

        let recommendation = match parse_reply(&raw_reply) {
            ModelReply::Structured(recommendation) => recommendation,
            ModelReply::Unstructured(text) => {
                tracing::warn!("Model reply was not the expected JSON, degrading to text");
                Recommendation {
                    product_ids: Vec::new(),
                    message: text,
                }
            }
        };

        // Resolve ids against the candidate set (not the full catalog),
        // dropping unmatched ids and preserving the model's order.
        let resolved: Vec<ProductSummary> = recommendation
            .product_ids
            .iter()
            .filter_map(|id| candidates.iter().find(|p| p.id == *id).cloned())
            .take(MAX_RECOMMENDATIONS)
            .collect();

        {
            let mut store = self.store.lock().await;
            store.append(
                session_id,
                ChatMessage::assistant(recommendation.message.clone()),
            );
            store.persist().context("Failed to persist session")?;
        }

        Ok(ChatOutcome {
            message: recommendation.message,
            products: resolved,
        })
    }
}
