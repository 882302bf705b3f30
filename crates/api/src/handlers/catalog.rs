//! Handlers for the `/catalog` resource. Read-only, served from the
//! compiled-in catalog.

use axum::extract::{Path, Query};
use axum::Json;
use jualputus_core::catalog::{self, Brand, Model};
use jualputus_core::error::CoreError;
use jualputus_core::labels::{
    LabeledOption, ACCESSORIES, CATEGORY_LABELS, CONDITION_LABELS, FUNCTIONAL_FEATURES,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelQuery {
    pub brand_id: Option<String>,
}

/// Option lists for the sell form.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub categories: Vec<LabeledOption>,
    pub conditions: Vec<LabeledOption>,
    pub functional_features: Vec<LabeledOption>,
    pub accessories: Vec<LabeledOption>,
}

/// GET /api/v1/catalog/brands
pub async fn list_brands(Query(params): Query<BrandQuery>) -> Json<DataResponse<Vec<Brand>>> {
    Json(DataResponse {
        data: catalog::brands(params.category.as_deref()),
    })
}

/// GET /api/v1/catalog/brands/{id}
pub async fn get_brand(Path(id): Path<String>) -> AppResult<Json<DataResponse<Brand>>> {
    let data = catalog::brand_by_id(&id).ok_or(CoreError::NotFound {
        entity: "Brand",
        key: id,
    })?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalog/models
pub async fn list_models(Query(params): Query<ModelQuery>) -> Json<DataResponse<Vec<Model>>> {
    Json(DataResponse {
        data: catalog::models(params.brand_id.as_deref()),
    })
}

/// GET /api/v1/catalog/models/{id}
pub async fn get_model(Path(id): Path<String>) -> AppResult<Json<DataResponse<Model>>> {
    let data = catalog::model_by_id(&id).ok_or(CoreError::NotFound {
        entity: "Model",
        key: id,
    })?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalog/options
pub async fn options() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse {
        data: FormOptions {
            categories: CATEGORY_LABELS.options(),
            conditions: CONDITION_LABELS.options(),
            functional_features: FUNCTIONAL_FEATURES.options(),
            accessories: ACCESSORIES.options(),
        },
    })
}
