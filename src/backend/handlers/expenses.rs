use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::NewExpense;
use crate::error::ApiError;
use crate::expenses::{build_expense_query, ExpenseFilter, ExpenseListing, ExpenseQueryParams};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseCreated {
    pub id: i64,
    pub amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseDeleted {
    pub message: String,
    pub id: i64,
}

pub async fn list_expenses(
    State(state): State<AppState>,
    query: Result<Query<ExpenseQueryParams>, QueryRejection>,
) -> Result<Json<ExpenseListing>, ApiError> {
    let Query(params) = query?;
    tracing::debug!(?params, "listing expenses");

    let filter = ExpenseFilter::try_from(params)?;
    let query = build_expense_query(&filter);
    tracing::debug!(sql = %query.sql.sql, args = query.sql.params.len(), "built expense query");

    let listing = queries::list_expenses(&state.db, &query).await?;
    Ok(Json(listing))
}

pub async fn create_expense(
    State(state): State<AppState>,
    body: Result<Json<NewExpense>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ApiError> {
    let Json(expense) = body?;

    if expense.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("Amount must be greater than 0".into()));
    }
    let amount = expense
        .amount
        .to_f64()
        .ok_or_else(|| ApiError::Validation("Amount is out of range".into()))?;
    if !queries::subcategory_exists(&state.db, expense.subcategory_id).await? {
        return Err(ApiError::NotFound("Subcategory not found".into()));
    }

    let id = queries::create_expense(&state.db, amount, &expense).await?;
    tracing::info!(expense_id = id, subcategory_id = expense.subcategory_id, "expense created");

    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            id,
            amount,
            message: "Expense created successfully".into(),
        }),
    ))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ExpenseDeleted>, ApiError> {
    let Path(expense_id) = id?;

    if !queries::delete_expense(&state.db, expense_id).await? {
        return Err(ApiError::NotFound("Expense not found".into()));
    }
    tracing::info!(expense_id, "expense deleted");

    Ok(Json(ExpenseDeleted {
        message: "Expense deleted successfully".into(),
        id: expense_id,
    }))
}
