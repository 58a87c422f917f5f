//! Quote rows - submitted trade-in requests

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::supabase::{SupabaseClient, SupabaseError};

/// A submitted quote request. `selected_features` maps feature id (as
/// string, matching the stored JSON) to the chosen option label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub category_id: i64,
    pub brand_id: i64,
    pub model_id: i64,
    pub selected_features: BTreeMap<String, String>,
    pub contact_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuote {
    pub category_id: i64,
    pub brand_id: i64,
    pub model_id: i64,
    pub selected_features: BTreeMap<String, String>,
    pub contact_number: Option<String>,
}

/// Quote table operations
#[derive(Clone)]
pub struct QuoteStore {
    client: SupabaseClient,
}

impl QuoteStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Persist a quote and return the stored row
    pub async fn create_quote(&self, new: &NewQuote) -> Result<Quote, SupabaseError> {
        self.client.insert("quotes", new).await
    }

    /// Newest-first listing for the admin review screen
    pub async fn list_quotes(&self) -> Result<Vec<Quote>, SupabaseError> {
        self.client
            .get("quotes", "select=*&order=created_at.desc")
            .await
    }

    pub async fn count_quotes(&self) -> Result<u64, SupabaseError> {
        self.client.count("quotes").await
    }
}
