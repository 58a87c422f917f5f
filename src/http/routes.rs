//! HTTP route definitions - storefront drill-down and quote submission

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::{header, Method},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::app::AppState;
use crate::http::admin;
use crate::http::error::AppError;
use crate::http::middleware::require_admin;
use crate::quote::{message, pricing, selection};
use crate::store::catalog::{Brand, Category, Feature, Model};
use crate::store::quotes::NewQuote;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - support multiple origins (comma-separated in CLIENT_ORIGIN)
    let allowed_origins: Vec<header::HeaderValue> = state
        .config
        .client_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<header::HeaderValue>().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Public storefront routes
    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/catalog/categories", get(list_categories_handler))
        .route("/catalog/categories/:id", get(get_category_handler))
        .route("/catalog/categories/:id/brands", get(list_brands_handler))
        .route("/catalog/brands/:id", get(get_brand_handler))
        .route("/catalog/brands/:id/models", get(list_models_handler))
        .route("/catalog/models/:id", get(get_model_handler))
        .route("/catalog/models/:id/features", get(list_features_handler))
        .route("/quotes", post(submit_quote_handler))
        .route("/admin/login", post(admin::login_handler));

    // Admin back-office routes (JWT required)
    let admin_routes = Router::new()
        .route("/admin/logout", post(admin::logout_handler))
        .route("/admin/dashboard", get(admin::dashboard_handler))
        .route("/admin/categories", post(admin::create_category_handler))
        .route(
            "/admin/categories/:id",
            patch(admin::rename_category_handler).delete(admin::delete_category_handler),
        )
        .route("/admin/brands", post(admin::create_brand_handler))
        .route(
            "/admin/brands/:id",
            patch(admin::rename_brand_handler).delete(admin::delete_brand_handler),
        )
        .route("/admin/models", post(admin::create_model_handler))
        .route(
            "/admin/models/:id",
            patch(admin::rename_model_handler).delete(admin::delete_model_handler),
        )
        .route("/admin/features", post(admin::create_feature_handler))
        .route(
            "/admin/features/:id",
            patch(admin::update_feature_handler).delete(admin::delete_feature_handler),
        )
        .route("/admin/quotes", get(admin::list_quotes_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
    })
}

// ============================================================================
// Drill-down reads: Category -> Brand -> Model -> Features
// ============================================================================

async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.catalog.list_categories().await?))
}

async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    state
        .catalog
        .get_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Kategori bulunamadı.".to_string()))
}

async fn list_brands_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Brand>>, AppError> {
    Ok(Json(state.catalog.list_brands_by_category(id).await?))
}

async fn get_brand_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Brand>, AppError> {
    state
        .catalog
        .get_brand(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Marka bulunamadı.".to_string()))
}

async fn list_models_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Model>>, AppError> {
    Ok(Json(state.catalog.list_models_by_brand(id).await?))
}

async fn get_model_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Model>, AppError> {
    state
        .catalog
        .get_model(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Model bulunamadı.".to_string()))
}

async fn list_features_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Feature>>, AppError> {
    Ok(Json(state.catalog.list_features_by_model(id).await?))
}

// ============================================================================
// Quote submission & handoff
// ============================================================================

#[derive(Deserialize)]
struct SubmitQuoteRequest {
    category_id: i64,
    brand_id: i64,
    model_id: i64,
    #[serde(default)]
    selected_features: BTreeMap<String, String>,
    #[serde(default)]
    contact_number: Option<String>,
}

#[derive(Serialize)]
struct SubmitQuoteResponse {
    quote_id: i64,
    amount: i64,
    whatsapp_url: String,
}

async fn submit_quote_handler(
    State(state): State<AppState>,
    Json(req): Json<SubmitQuoteRequest>,
) -> Result<Json<SubmitQuoteResponse>, AppError> {
    let category = state
        .catalog
        .get_category(req.category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Kategori bulunamadı.".to_string()))?;
    let brand = state
        .catalog
        .get_brand(req.brand_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Marka bulunamadı.".to_string()))?;
    let model = state
        .catalog
        .get_model(req.model_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Model bulunamadı.".to_string()))?;

    let features = state.catalog.list_features_by_model(model.id).await?;
    let selected = selection::validate_selection(&features, &req.selected_features)?;

    let amount = pricing::quote_amount(selected.values().map(String::as_str));

    let quote = state
        .quotes
        .create_quote(&NewQuote {
            category_id: category.id,
            brand_id: brand.id,
            model_id: model.id,
            selected_features: selected.clone(),
            contact_number: req.contact_number,
        })
        .await?;

    let summary = message::build_summary(
        &category.name,
        &brand.name,
        &model.name,
        &features,
        &selected,
    );
    let whatsapp_url = message::handoff_url(&state.config.whatsapp_number, &summary)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(SubmitQuoteResponse {
        quote_id: quote.id,
        amount,
        whatsapp_url: whatsapp_url.into(),
    }))
}
