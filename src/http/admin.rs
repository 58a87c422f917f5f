//! Admin back-office handlers - catalog CRUD, dashboard, quote review

use axum::{
    extract::{Extension, Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::cascade::CascadeReport;
use crate::admin::uploads::{store_image, ImageKind, StoredImage};
use crate::app::AppState;
use crate::http::error::AppError;
use crate::http::middleware::AdminSession;
use crate::store::catalog::{
    Brand, Category, Feature, FeatureUpdate, Model, NewBrand, NewCategory, NewFeature, NewModel,
};
use crate::store::quotes::Quote;

// ============================================================================
// Auth
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state.auth.sign_in(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
    }))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<StatusCode, AppError> {
    state.auth.sign_out(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Serialize)]
pub struct DashboardResponse {
    categories: u64,
    brands: u64,
    models: u64,
    features: u64,
    quotes: u64,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(DashboardResponse {
        categories: state.catalog.count_categories().await?,
        brands: state.catalog.count_brands().await?,
        models: state.catalog.count_models().await?,
        features: state.catalog.count_features().await?,
        quotes: state.quotes.count_quotes().await?,
    }))
}

// ============================================================================
// Multipart create forms (name, optional parent id, optional image file)
// ============================================================================

struct UploadForm {
    name: Option<String>,
    parent_id: Option<i64>,
    image: Option<ImageUpload>,
}

struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

async fn read_upload_form(
    mut multipart: Multipart,
    parent_field: Option<&str>,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        name: None,
        parent_id: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.name = Some(value);
            }
            Some(name) if Some(name) == parent_field => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = value
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Geçersiz {}", name)))?;
                form.parent_id = Some(id);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

impl UploadForm {
    fn name(&self) -> Result<String, AppError> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(AppError::BadRequest("İsim boş olamaz.".to_string())),
        }
    }

    fn parent_id(&self, field: &str) -> Result<i64, AppError> {
        self.parent_id
            .ok_or_else(|| AppError::BadRequest(format!("{} gerekli.", field)))
    }
}

/// Upload the form's image, if any, returning (public_url, path)
async fn maybe_store_image(
    state: &AppState,
    kind: ImageKind,
    image: Option<ImageUpload>,
) -> Result<(Option<String>, Option<String>), AppError> {
    match image {
        Some(upload) => {
            let StoredImage { public_url, path } = store_image(
                &state.storage,
                kind,
                &upload.file_name,
                &upload.content_type,
                upload.bytes,
            )
            .await?;
            Ok((Some(public_url), Some(path)))
        }
        None => Ok((None, None)),
    }
}

// ============================================================================
// Categories
// ============================================================================

pub async fn create_category_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Category>, AppError> {
    let form = read_upload_form(multipart, None).await?;
    let name = form.name()?;
    let (image_url, image_path) = maybe_store_image(&state, ImageKind::Category, form.image).await?;

    let category = state
        .catalog
        .create_category(&NewCategory { name, image_url, image_path })
        .await?;

    Ok(Json(category))
}

#[derive(Deserialize)]
pub struct RenameRequest {
    name: String,
}

pub async fn rename_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Kategori bulunamadı.".to_string()))?;
    state.catalog.rename_category(id, req.name.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct CascadeResponse {
    steps: usize,
    images_removed: usize,
    images_failed: usize,
}

impl From<CascadeReport> for CascadeResponse {
    fn from(report: CascadeReport) -> Self {
        Self {
            steps: report.steps,
            images_removed: report.images_removed,
            images_failed: report.images_failed,
        }
    }
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CascadeResponse>, AppError> {
    let report = state.cascade.delete_category(id).await?;
    Ok(Json(report.into()))
}

// ============================================================================
// Brands
// ============================================================================

pub async fn create_brand_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Brand>, AppError> {
    let form = read_upload_form(multipart, Some("category_id")).await?;
    let name = form.name()?;
    let category_id = form.parent_id("category_id")?;

    // Parent must exist; referential integrity is only this check
    state
        .catalog
        .get_category(category_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Kategori bulunamadı.".to_string()))?;

    let (image_url, image_path) = maybe_store_image(&state, ImageKind::Brand, form.image).await?;

    let brand = state
        .catalog
        .create_brand(&NewBrand { name, category_id, image_url, image_path })
        .await?;

    Ok(Json(brand))
}

pub async fn rename_brand_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .get_brand(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Marka bulunamadı.".to_string()))?;
    state.catalog.rename_brand(id, req.name.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_brand_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CascadeResponse>, AppError> {
    let report = state.cascade.delete_brand(id).await?;
    Ok(Json(report.into()))
}

// ============================================================================
// Models
// ============================================================================

pub async fn create_model_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Model>, AppError> {
    let form = read_upload_form(multipart, Some("brand_id")).await?;
    let name = form.name()?;
    let brand_id = form.parent_id("brand_id")?;

    state
        .catalog
        .get_brand(brand_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Marka bulunamadı.".to_string()))?;

    let (image_url, image_path) = maybe_store_image(&state, ImageKind::Model, form.image).await?;

    let model = state
        .catalog
        .create_model(&NewModel { name, brand_id, image_url, image_path })
        .await?;

    Ok(Json(model))
}

pub async fn rename_model_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .get_model(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Model bulunamadı.".to_string()))?;
    state.catalog.rename_model(id, req.name.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_model_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CascadeResponse>, AppError> {
    let report = state.cascade.delete_model(id).await?;
    Ok(Json(report.into()))
}

// ============================================================================
// Features
// ============================================================================

#[derive(Deserialize)]
pub struct CreateFeatureRequest {
    model_id: i64,
    name: String,
    options: Vec<String>,
}

pub async fn create_feature_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateFeatureRequest>,
) -> Result<Json<Feature>, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("İsim boş olamaz.".to_string()));
    }
    if req.options.is_empty() {
        return Err(AppError::BadRequest(
            "En az bir seçenek girmelisiniz.".to_string(),
        ));
    }

    state
        .catalog
        .get_model(req.model_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Model bulunamadı.".to_string()))?;

    let feature = state
        .catalog
        .create_feature(&NewFeature {
            name,
            model_id: req.model_id,
            options: req.options,
        })
        .await?;

    Ok(Json(feature))
}

#[derive(Deserialize)]
pub struct UpdateFeatureRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

pub async fn update_feature_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFeatureRequest>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .get_feature(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Özellik bulunamadı.".to_string()))?;

    state
        .catalog
        .update_feature(
            id,
            &FeatureUpdate {
                name: req.name,
                options: req.options,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_feature_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .get_feature(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Özellik bulunamadı.".to_string()))?;
    state.catalog.delete_feature(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Quote review
// ============================================================================

pub async fn list_quotes_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Quote>>, AppError> {
    Ok(Json(state.quotes.list_quotes().await?))
}
