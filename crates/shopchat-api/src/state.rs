use std::sync::Arc;

use tokio::sync::Mutex;

use shopchat_catalog::CatalogClient;
use shopchat_recommend::Recommender;
use shopchat_session::SessionStore;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The session store sits behind a mutex for memory safety only; two
/// requests on the same session id still race read-modify-write across the
/// pipeline's append points (last write wins).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogClient>,
    pub store: Arc<Mutex<SessionStore>>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn CatalogClient>,
        store: Arc<Mutex<SessionStore>>,
        recommender: Recommender,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            store,
            recommender: Arc::new(recommender),
        }
    }
}
