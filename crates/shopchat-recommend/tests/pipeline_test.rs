use std::sync::{Arc, Mutex as StdMutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use shopchat_catalog::CatalogClient;
use shopchat_llm::GenerativeClient;
use shopchat_recommend::Recommender;
use shopchat_session::SessionStore;

/// Catalog stub serving a fixed raw product list.
struct StubCatalog {
    products: Vec<Value>,
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn fetch_products(&self) -> Result<Vec<Value>> {
        Ok(self.products.clone())
    }
}

/// Model stub returning a canned reply and capturing the prompt it saw.
struct StubModel {
    reply: String,
    seen_prompt: StdMutex<Option<String>>,
}

impl StubModel {
    fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            seen_prompt: StdMutex::new(None),
        })
    }

    fn prompt(&self) -> String {
        self.seen_prompt.lock().unwrap().clone().expect("model was never invoked")
    }
}

#[async_trait]
impl GenerativeClient for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }
}

fn raw_product(id: u64, title: &str, tags: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body_html": format!("<p>{}</p>", title),
        "handle": title.to_lowercase().replace(' ', "-"),
        "tags": tags,
        "variants": [{ "price": price }],
        "images": []
    })
}

fn shoe_and_shirt_catalog() -> Vec<Value> {
    vec![
        raw_product(1, "Trail Runner", "shoe, running", "4000"),
        raw_product(2, "Linen Top", "shirt, summer", "3000"),
    ]
}

fn recommender(
    dir: &tempfile::TempDir,
    products: Vec<Value>,
    model: Arc<StubModel>,
) -> (Recommender, Arc<Mutex<SessionStore>>) {
    let store = Arc::new(Mutex::new(SessionStore::load(
        dir.path().join("sessions.json"),
    )));
    let rec = Recommender::new(
        store.clone(),
        Arc::new(StubCatalog { products }),
        model,
        "demo.myshopify.com",
    );
    (rec, store)
}

#[tokio::test]
async fn test_filters_narrow_candidates_before_model_call() {
    let dir = tempfile::tempdir().unwrap();
    let model = StubModel::new(r#"{"productIds": [1], "message": "The Trail Runner fits"}"#);
    let (rec, _) = recommender(&dir, shoe_and_shirt_catalog(), model.clone());

    let outcome = rec.chat("s1", "shoes under 5000").await.unwrap();

    let prompt = model.prompt();
    assert!(prompt.contains("Trail Runner"));
    assert!(!prompt.contains("Linen Top"));

    assert_eq!(outcome.products.len(), 1);
    assert_eq!(outcome.products[0].id, 1);
    assert_eq!(outcome.message, "The Trail Runner fits");
}

#[tokio::test]
async fn test_empty_filter_result_falls_back_to_full_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let model = StubModel::new(r#"{"productIds": [], "message": "Nothing in budget"}"#);
    let (rec, _) = recommender(&dir, shoe_and_shirt_catalog(), model.clone());

    // Budget below every price: the filter empties the set, so the model
    // must still see the whole catalog.
    rec.chat("s1", "shoes under 10").await.unwrap();

    let prompt = model.prompt();
    assert!(prompt.contains("Trail Runner"));
    assert!(prompt.contains("Linen Top"));
}

#[tokio::test]
async fn test_malformed_reply_degrades_to_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let raw = "I'm not sure what you mean, could you clarify?";
    let model = StubModel::new(raw);
    let (rec, _) = recommender(&dir, shoe_and_shirt_catalog(), model);

    let outcome = rec.chat("s1", "hmm").await.unwrap();

    assert!(outcome.products.is_empty());
    assert_eq!(outcome.message, raw);
}

#[tokio::test]
async fn test_unmatched_ids_dropped_and_order_preserved() {
    let dir = tempfile::tempdir().unwrap();
    // 999 is not in the candidate set; 2 and 1 are, in model order.
    let model = StubModel::new(r#"{"productIds": [999, 2, 1], "message": "Two picks"}"#);
    let (rec, _) = recommender(&dir, shoe_and_shirt_catalog(), model);

    let outcome = rec.chat("s1", "anything nice").await.unwrap();

    let ids: Vec<u64> = outcome.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_resolved_products_capped_at_three() {
    let dir = tempfile::tempdir().unwrap();
    let products = (1..=5)
        .map(|i| raw_product(i, &format!("Item {}", i), "", "100"))
        .collect();
    let model = StubModel::new(r#"{"productIds": [1, 2, 3, 4, 5], "message": "All of them"}"#);
    let (rec, _) = recommender(&dir, products, model);

    let outcome = rec.chat("s1", "everything").await.unwrap();
    assert_eq!(outcome.products.len(), 3);
}

#[tokio::test]
async fn test_both_turns_recorded_in_session_history() {
    let dir = tempfile::tempdir().unwrap();
    let model = StubModel::new(r#"{"productIds": [1], "message": "Try the Trail Runner"}"#);
    let (rec, store) = recommender(&dir, shoe_and_shirt_catalog(), model);

    rec.chat("s1", "shoes under 5000").await.unwrap();

    let store = store.lock().await;
    let history = store.history("s1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role(), "user");
    assert_eq!(history[0].text(), "shoes under 5000");
    assert_eq!(history[1].role(), "assistant");
    assert_eq!(history[1].text(), "Try the Trail Runner");
}

#[tokio::test]
async fn test_catalog_failure_aborts_after_user_turn_recorded() {
    struct FailingCatalog;

    #[async_trait]
    impl CatalogClient for FailingCatalog {
        async fn fetch_products(&self) -> Result<Vec<Value>> {
            anyhow::bail!("upstream unreachable")
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Mutex::new(SessionStore::load(
        dir.path().join("sessions.json"),
    )));
    let rec = Recommender::new(
        store.clone(),
        Arc::new(FailingCatalog),
        StubModel::new("unused"),
        "demo.myshopify.com",
    );

    assert!(rec.chat("s1", "shoes").await.is_err());

    // The user turn was persisted before the fetch failed.
    let store = store.lock().await;
    assert_eq!(store.history("s1").len(), 1);
}
