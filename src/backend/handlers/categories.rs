use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{require_name, NameRequest, Renamed};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::Category;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCreated {
    pub id: i64,
    pub name: String,
    pub message: String,
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = queries::get_all_categories(&state.db).await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let Path(category_id) = id?;
    queries::get_category_by_id(&state.db, category_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))
}

pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<NameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryCreated>), ApiError> {
    let Json(request) = body?;
    let name = require_name(&request.name, "Category", 3)?;

    if queries::category_name_taken(&state.db, &name, None).await? {
        return Err(ApiError::Conflict("Category name already exists".into()));
    }

    let id = queries::create_category(&state.db, &name).await?;
    tracing::info!(category_id = id, %name, "category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryCreated {
            id,
            name,
            message: "Category created successfully".into(),
        }),
    ))
}

pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NameRequest>, JsonRejection>,
) -> Result<Json<Renamed>, ApiError> {
    let Path(category_id) = id?;
    let Json(request) = body?;
    let name = require_name(&request.name, "Category", 1)?;

    if queries::category_name_taken(&state.db, &name, Some(category_id)).await? {
        return Err(ApiError::Conflict("Category name already exists".into()));
    }

    if !queries::update_category(&state.db, category_id, &name).await? {
        return Err(ApiError::NotFound("Category not found".into()));
    }

    Ok(Json(Renamed {
        message: "Category updated successfully".into(),
        id: category_id,
        name,
    }))
}
