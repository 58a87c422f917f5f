//! Cascade delete for the catalog hierarchy
//!
//! Deleting a Category or Brand must take its whole subtree with it:
//! descendant rows and their stored images. There is no transaction over
//! the remote table API, so the cascade is an explicit ordered plan built
//! from the fetched subtree and executed leaf-first. Image removals are
//! best-effort: a failure is logged and counted, never aborts the cascade.
//! Row deletions propagate errors.

use tracing::{info, warn};

use super::uploads::ImageKind;
use crate::store::catalog::{Brand, CatalogStore, Category, Model};
use crate::store::storage::{extract_object_path, StorageClient};
use crate::store::supabase::SupabaseError;

/// One step of a cascade plan, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeStep {
    RemoveImage { path: String },
    DeleteFeaturesOfModel { model_id: i64 },
    DeleteModelsOfBrand { brand_id: i64 },
    DeleteBrandsOfCategory { category_id: i64 },
    DeleteModel { id: i64 },
    DeleteBrand { id: i64 },
    DeleteCategory { id: i64 },
}

/// Outcome of an executed cascade
#[derive(Debug, Clone, Default)]
pub struct CascadeReport {
    pub steps: usize,
    pub images_removed: usize,
    pub images_failed: usize,
}

/// Image removal step for a row, preferring the canonical stored path
/// and falling back to URL extraction for legacy rows
fn image_step(
    image_path: Option<&str>,
    image_url: Option<&str>,
    bucket: &str,
    kind: ImageKind,
) -> Option<CascadeStep> {
    if let Some(path) = image_path {
        return Some(CascadeStep::RemoveImage { path: path.to_string() });
    }
    let url = image_url?;
    extract_object_path(url, bucket, kind.folder()).map(|path| CascadeStep::RemoveImage { path })
}

/// Plan the deletion of a category and everything beneath it
pub fn plan_category_delete(
    category: &Category,
    subtree: &[(Brand, Vec<Model>)],
    bucket: &str,
) -> Vec<CascadeStep> {
    let mut plan = Vec::new();

    for (brand, models) in subtree {
        for model in models {
            if let Some(step) = image_step(
                model.image_path.as_deref(),
                model.image_url.as_deref(),
                bucket,
                ImageKind::Model,
            ) {
                plan.push(step);
            }
            plan.push(CascadeStep::DeleteFeaturesOfModel { model_id: model.id });
        }
        plan.push(CascadeStep::DeleteModelsOfBrand { brand_id: brand.id });

        if let Some(step) = image_step(
            brand.image_path.as_deref(),
            brand.image_url.as_deref(),
            bucket,
            ImageKind::Brand,
        ) {
            plan.push(step);
        }
    }

    plan.push(CascadeStep::DeleteBrandsOfCategory { category_id: category.id });

    if let Some(step) = image_step(
        category.image_path.as_deref(),
        category.image_url.as_deref(),
        bucket,
        ImageKind::Category,
    ) {
        plan.push(step);
    }

    plan.push(CascadeStep::DeleteCategory { id: category.id });
    plan
}

/// Plan the deletion of a brand and its models
pub fn plan_brand_delete(brand: &Brand, models: &[Model], bucket: &str) -> Vec<CascadeStep> {
    let mut plan = Vec::new();

    for model in models {
        if let Some(step) = image_step(
            model.image_path.as_deref(),
            model.image_url.as_deref(),
            bucket,
            ImageKind::Model,
        ) {
            plan.push(step);
        }
        plan.push(CascadeStep::DeleteFeaturesOfModel { model_id: model.id });
    }
    plan.push(CascadeStep::DeleteModelsOfBrand { brand_id: brand.id });

    if let Some(step) = image_step(
        brand.image_path.as_deref(),
        brand.image_url.as_deref(),
        bucket,
        ImageKind::Brand,
    ) {
        plan.push(step);
    }

    plan.push(CascadeStep::DeleteBrand { id: brand.id });
    plan
}

/// Plan the deletion of a single model and its features
pub fn plan_model_delete(model: &Model, bucket: &str) -> Vec<CascadeStep> {
    let mut plan = Vec::new();

    if let Some(step) = image_step(
        model.image_path.as_deref(),
        model.image_url.as_deref(),
        bucket,
        ImageKind::Model,
    ) {
        plan.push(step);
    }
    plan.push(CascadeStep::DeleteFeaturesOfModel { model_id: model.id });
    plan.push(CascadeStep::DeleteModel { id: model.id });
    plan
}

/// Fetches the subtree, builds the plan and runs it step by step
#[derive(Clone)]
pub struct CascadeExecutor {
    catalog: CatalogStore,
    storage: StorageClient,
}

impl CascadeExecutor {
    pub fn new(catalog: CatalogStore, storage: StorageClient) -> Self {
        Self { catalog, storage }
    }

    pub async fn delete_category(&self, id: i64) -> Result<CascadeReport, CascadeError> {
        let category = self
            .catalog
            .get_category(id)
            .await?
            .ok_or(CascadeError::NotFound)?;

        let brands = self.catalog.list_brands_by_category(id).await?;
        let mut subtree = Vec::with_capacity(brands.len());
        for brand in brands {
            let models = self.catalog.list_models_by_brand(brand.id).await?;
            subtree.push((brand, models));
        }

        let plan = plan_category_delete(&category, &subtree, self.storage.bucket());
        self.run(plan).await
    }

    pub async fn delete_brand(&self, id: i64) -> Result<CascadeReport, CascadeError> {
        let brand = self
            .catalog
            .get_brand(id)
            .await?
            .ok_or(CascadeError::NotFound)?;
        let models = self.catalog.list_models_by_brand(id).await?;

        let plan = plan_brand_delete(&brand, &models, self.storage.bucket());
        self.run(plan).await
    }

    pub async fn delete_model(&self, id: i64) -> Result<CascadeReport, CascadeError> {
        let model = self
            .catalog
            .get_model(id)
            .await?
            .ok_or(CascadeError::NotFound)?;

        let plan = plan_model_delete(&model, self.storage.bucket());
        self.run(plan).await
    }

    async fn run(&self, plan: Vec<CascadeStep>) -> Result<CascadeReport, CascadeError> {
        let mut report = CascadeReport {
            steps: plan.len(),
            ..Default::default()
        };

        for step in plan {
            match step {
                CascadeStep::RemoveImage { path } => {
                    match self.storage.remove(&[path.clone()]).await {
                        Ok(()) => {
                            info!(%path, "removed catalog image");
                            report.images_removed += 1;
                        }
                        Err(e) => {
                            // Orphaned blobs are an accepted risk; keep going
                            warn!(%path, error = %e, "failed to remove catalog image");
                            report.images_failed += 1;
                        }
                    }
                }
                CascadeStep::DeleteFeaturesOfModel { model_id } => {
                    self.catalog.delete_features_by_model(model_id).await?;
                }
                CascadeStep::DeleteModelsOfBrand { brand_id } => {
                    self.catalog.delete_models_by_brand(brand_id).await?;
                }
                CascadeStep::DeleteBrandsOfCategory { category_id } => {
                    self.catalog.delete_brands_by_category(category_id).await?;
                }
                CascadeStep::DeleteModel { id } => {
                    self.catalog.delete_model(id).await?;
                }
                CascadeStep::DeleteBrand { id } => {
                    self.catalog.delete_brand(id).await?;
                }
                CascadeStep::DeleteCategory { id } => {
                    self.catalog.delete_category(id).await?;
                }
            }
        }

        Ok(report)
    }
}

/// Cascade delete errors
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    #[error("Row not found")]
    NotFound,

    #[error("Catalog store error: {0}")]
    Store(#[from] SupabaseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, image_path: Option<&str>, image_url: Option<&str>) -> Category {
        Category {
            id,
            name: format!("category-{}", id),
            image_url: image_url.map(String::from),
            image_path: image_path.map(String::from),
            created_at: chrono::Utc::now(),
        }
    }

    fn brand(id: i64, category_id: i64, image_path: Option<&str>) -> Brand {
        Brand {
            id,
            name: format!("brand-{}", id),
            category_id,
            image_url: None,
            image_path: image_path.map(String::from),
            created_at: chrono::Utc::now(),
        }
    }

    fn model(id: i64, brand_id: i64, image_url: Option<&str>) -> Model {
        Model {
            id,
            name: format!("model-{}", id),
            brand_id,
            image_url: image_url.map(String::from),
            image_path: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn category_plan_deletes_children_before_parent() {
        let cat = category(1, Some("category-images/c.png"), None);
        let subtree = vec![
            (
                brand(10, 1, Some("brand-images/b.png")),
                vec![model(100, 10, None), model(101, 10, None)],
            ),
            (brand(11, 1, None), vec![]),
        ];

        let plan = plan_category_delete(&cat, &subtree, "images");

        let pos = |step: &CascadeStep| plan.iter().position(|s| s == step).unwrap();

        // Features go before their models, models before brands, brands
        // before the category row
        assert!(
            pos(&CascadeStep::DeleteFeaturesOfModel { model_id: 100 })
                < pos(&CascadeStep::DeleteModelsOfBrand { brand_id: 10 })
        );
        assert!(
            pos(&CascadeStep::DeleteModelsOfBrand { brand_id: 11 })
                < pos(&CascadeStep::DeleteBrandsOfCategory { category_id: 1 })
        );
        assert!(
            pos(&CascadeStep::DeleteBrandsOfCategory { category_id: 1 })
                < pos(&CascadeStep::DeleteCategory { id: 1 })
        );

        // The category row delete is the final step
        assert_eq!(plan.last(), Some(&CascadeStep::DeleteCategory { id: 1 }));
    }

    #[test]
    fn plan_prefers_stored_path_over_url_extraction() {
        let cat = category(
            1,
            Some("category-images/stored.png"),
            Some("https://host/storage/v1/object/public/images/category-images/derived.png"),
        );

        let plan = plan_category_delete(&cat, &[], "images");

        assert!(plan.contains(&CascadeStep::RemoveImage {
            path: "category-images/stored.png".to_string()
        }));
        assert!(!plan.iter().any(|s| matches!(
            s,
            CascadeStep::RemoveImage { path } if path.contains("derived")
        )));
    }

    #[test]
    fn plan_extracts_path_for_legacy_rows() {
        let m = model(
            100,
            10,
            Some("https://host/storage/v1/object/public/images/model-images/legacy.png"),
        );

        let plan = plan_model_delete(&m, "images");

        assert_eq!(
            plan,
            vec![
                CascadeStep::RemoveImage {
                    path: "model-images/legacy.png".to_string()
                },
                CascadeStep::DeleteFeaturesOfModel { model_id: 100 },
                CascadeStep::DeleteModel { id: 100 },
            ]
        );
    }

    #[test]
    fn rows_without_images_produce_no_removal_steps() {
        let b = brand(10, 1, None);
        let plan = plan_brand_delete(&b, &[], "images");

        assert_eq!(
            plan,
            vec![
                CascadeStep::DeleteModelsOfBrand { brand_id: 10 },
                CascadeStep::DeleteBrand { id: 10 },
            ]
        );
    }
}
