//! Catalog tables - categories, brands, models, features

use serde::{Deserialize, Serialize};

use super::supabase::{SupabaseClient, SupabaseError};

/// Root of the catalog hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    /// Canonical in-bucket path, written at upload time. Legacy rows
    /// only have the URL and fall back to extraction on delete.
    pub image_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub brand_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Condition feature of a model, e.g. "Ekran" with options ["İyi", "Orta"]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    pub name: String,
    pub model_id: i64,
    pub options: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBrand {
    pub name: String,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewModel {
    pub name: String,
    pub brand_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFeature {
    pub name: String,
    pub model_id: i64,
    pub options: Vec<String>,
}

/// Rename patch shared by categories, brands and models
#[derive(Debug, Clone, Serialize)]
pub struct NameUpdate {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Catalog table operations
#[derive(Clone)]
pub struct CatalogStore {
    client: SupabaseClient,
}

impl CatalogStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, SupabaseError> {
        self.client.get("categories", "select=*&order=name").await
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, SupabaseError> {
        self.client
            .get_one("categories", &format!("id=eq.{}&select=*", id))
            .await
    }

    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, SupabaseError> {
        self.client.insert("categories", new).await
    }

    pub async fn rename_category(&self, id: i64, name: &str) -> Result<(), SupabaseError> {
        self.client
            .update(
                "categories",
                &format!("id=eq.{}", id),
                &NameUpdate { name: name.to_string() },
            )
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), SupabaseError> {
        self.client.delete("categories", &format!("id=eq.{}", id)).await
    }

    pub async fn count_categories(&self) -> Result<u64, SupabaseError> {
        self.client.count("categories").await
    }

    // ------------------------------------------------------------------
    // Brands
    // ------------------------------------------------------------------

    pub async fn list_brands(&self) -> Result<Vec<Brand>, SupabaseError> {
        self.client.get("brands", "select=*&order=name").await
    }

    pub async fn list_brands_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Brand>, SupabaseError> {
        self.client
            .get(
                "brands",
                &format!("category_id=eq.{}&select=*&order=name", category_id),
            )
            .await
    }

    pub async fn get_brand(&self, id: i64) -> Result<Option<Brand>, SupabaseError> {
        self.client
            .get_one("brands", &format!("id=eq.{}&select=*", id))
            .await
    }

    pub async fn create_brand(&self, new: &NewBrand) -> Result<Brand, SupabaseError> {
        self.client.insert("brands", new).await
    }

    pub async fn rename_brand(&self, id: i64, name: &str) -> Result<(), SupabaseError> {
        self.client
            .update(
                "brands",
                &format!("id=eq.{}", id),
                &NameUpdate { name: name.to_string() },
            )
            .await
    }

    pub async fn delete_brand(&self, id: i64) -> Result<(), SupabaseError> {
        self.client.delete("brands", &format!("id=eq.{}", id)).await
    }

    pub async fn delete_brands_by_category(&self, category_id: i64) -> Result<(), SupabaseError> {
        self.client
            .delete("brands", &format!("category_id=eq.{}", category_id))
            .await
    }

    pub async fn count_brands(&self) -> Result<u64, SupabaseError> {
        self.client.count("brands").await
    }

    // ------------------------------------------------------------------
    // Models
    // ------------------------------------------------------------------

    pub async fn list_models(&self) -> Result<Vec<Model>, SupabaseError> {
        self.client.get("models", "select=*&order=name").await
    }

    pub async fn list_models_by_brand(&self, brand_id: i64) -> Result<Vec<Model>, SupabaseError> {
        self.client
            .get("models", &format!("brand_id=eq.{}&select=*&order=name", brand_id))
            .await
    }

    pub async fn get_model(&self, id: i64) -> Result<Option<Model>, SupabaseError> {
        self.client
            .get_one("models", &format!("id=eq.{}&select=*", id))
            .await
    }

    pub async fn create_model(&self, new: &NewModel) -> Result<Model, SupabaseError> {
        self.client.insert("models", new).await
    }

    pub async fn rename_model(&self, id: i64, name: &str) -> Result<(), SupabaseError> {
        self.client
            .update(
                "models",
                &format!("id=eq.{}", id),
                &NameUpdate { name: name.to_string() },
            )
            .await
    }

    pub async fn delete_model(&self, id: i64) -> Result<(), SupabaseError> {
        self.client.delete("models", &format!("id=eq.{}", id)).await
    }

    pub async fn delete_models_by_brand(&self, brand_id: i64) -> Result<(), SupabaseError> {
        self.client
            .delete("models", &format!("brand_id=eq.{}", brand_id))
            .await
    }

    pub async fn count_models(&self) -> Result<u64, SupabaseError> {
        self.client.count("models").await
    }

    // ------------------------------------------------------------------
    // Features
    // ------------------------------------------------------------------

    pub async fn list_features_by_model(&self, model_id: i64) -> Result<Vec<Feature>, SupabaseError> {
        self.client
            .get(
                "features",
                &format!("model_id=eq.{}&select=*&order=name", model_id),
            )
            .await
    }

    pub async fn get_feature(&self, id: i64) -> Result<Option<Feature>, SupabaseError> {
        self.client
            .get_one("features", &format!("id=eq.{}&select=*", id))
            .await
    }

    pub async fn create_feature(&self, new: &NewFeature) -> Result<Feature, SupabaseError> {
        self.client.insert("features", new).await
    }

    pub async fn update_feature(
        &self,
        id: i64,
        update: &FeatureUpdate,
    ) -> Result<(), SupabaseError> {
        self.client
            .update("features", &format!("id=eq.{}", id), update)
            .await
    }

    pub async fn delete_feature(&self, id: i64) -> Result<(), SupabaseError> {
        self.client.delete("features", &format!("id=eq.{}", id)).await
    }

    pub async fn delete_features_by_model(&self, model_id: i64) -> Result<(), SupabaseError> {
        self.client
            .delete("features", &format!("model_id=eq.{}", model_id))
            .await
    }

    pub async fn count_features(&self) -> Result<u64, SupabaseError> {
        self.client.count("features").await
    }
}
