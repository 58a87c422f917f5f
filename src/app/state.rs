//! Application state shared across routes

use std::sync::Arc;
use std::time::Instant;

use crate::admin::cascade::CascadeExecutor;
use crate::config::Config;
use crate::store::{AuthClient, CatalogStore, QuoteStore, StorageClient, SupabaseClient};

/// Shared application state. Clients are constructed once here and passed
/// in explicitly; there is no global handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: CatalogStore,
    pub quotes: QuoteStore,
    pub storage: StorageClient,
    pub auth: AuthClient,
    pub cascade: CascadeExecutor,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let supabase = SupabaseClient::new(&config);
        let storage = StorageClient::new(&config);
        let auth = AuthClient::new(&config);

        let catalog = CatalogStore::new(supabase.clone());
        let quotes = QuoteStore::new(supabase);

        let cascade = CascadeExecutor::new(catalog.clone(), storage.clone());

        Self {
            config,
            catalog,
            quotes,
            storage,
            auth,
            cascade,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
