use axum::extract::Path;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::domain::filter::filter_catalog::{catalog, is_allowed, FilterCatalogEntry};
use crate::domain::filter::resource_type::ResourceType;
use crate::domain::filter::time_window::{resolve, CreatedFilter, TimeFilter};
use crate::errors::AppError;

pub struct FilterController;

impl FilterController {
    pub async fn catalog() -> Result<Json<ApiResponse<Vec<FilterCatalogEntry>>>, AppError> {
        to_json(Ok(catalog()))
    }

    pub async fn allowed_fields(
        Path(resource): Path<String>,
    ) -> Result<Json<ApiResponse<FilterCatalogEntry>>, AppError> {
        let resource: ResourceType = resource.parse()?;
        to_json(Ok(FilterCatalogEntry::for_resource(resource)))
    }

    pub async fn check_field(
        Path((resource, field)): Path<(String, String)>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        let resource: ResourceType = resource.parse()?;
        let allowed = is_allowed(resource, &field);
        to_json(Ok(json!({ "resource": resource, "field": field, "allowed": allowed })))
    }

    pub async fn resolve_time_filter(
        Path(selection): Path<String>,
    ) -> Result<Json<ApiResponse<CreatedFilter>>, AppError> {
        let selection: TimeFilter = selection.parse()?;
        to_json(Ok(resolve(selection, Utc::now().timestamp())))
    }
}
