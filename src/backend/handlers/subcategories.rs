use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{require_name, NameRequest, Renamed};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{SubcategoryDetail, SubcategoryUsage};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewSubcategoryRequest {
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryCreated {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub message: String,
}

pub async fn get_subcategory(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SubcategoryDetail>, ApiError> {
    let Path(subcategory_id) = id?;
    queries::get_subcategory_by_id(&state.db, subcategory_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Subcategory not found".into()))
}

pub async fn create_subcategory(
    State(state): State<AppState>,
    body: Result<Json<NewSubcategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubcategoryCreated>), ApiError> {
    let Json(request) = body?;
    let name = require_name(&request.name, "Subcategory", 3)?;

    if request.category_id <= 0 {
        return Err(ApiError::Validation("Valid category_id is required".into()));
    }
    if !queries::category_exists(&state.db, request.category_id).await? {
        return Err(ApiError::NotFound("Category not found".into()));
    }
    if queries::subcategory_name_taken(&state.db, request.category_id, &name).await? {
        return Err(ApiError::Conflict(
            "Subcategory name already exists in this category".into(),
        ));
    }

    let id = queries::create_subcategory(&state.db, &name, request.category_id).await?;
    tracing::info!(subcategory_id = id, category_id = request.category_id, "subcategory created");

    Ok((
        StatusCode::CREATED,
        Json(SubcategoryCreated {
            id,
            name,
            category_id: request.category_id,
            message: "Subcategory created successfully".into(),
        }),
    ))
}

pub async fn update_subcategory(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NameRequest>, JsonRejection>,
) -> Result<Json<Renamed>, ApiError> {
    let Path(subcategory_id) = id?;
    let Json(request) = body?;
    let name = require_name(&request.name, "Subcategory", 1)?;

    if queries::subcategory_rename_clashes(&state.db, subcategory_id, &name).await? {
        return Err(ApiError::Conflict(
            "Subcategory name already exists in this category".into(),
        ));
    }

    if !queries::update_subcategory(&state.db, subcategory_id, &name).await? {
        return Err(ApiError::NotFound("Subcategory not found".into()));
    }

    Ok(Json(Renamed {
        message: "Subcategory updated successfully".into(),
        id: subcategory_id,
        name,
    }))
}

pub async fn subcategories_by_expense_count(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubcategoryUsage>>, ApiError> {
    let usage = queries::subcategories_by_expense_count(&state.db).await?;
    Ok(Json(usage))
}
