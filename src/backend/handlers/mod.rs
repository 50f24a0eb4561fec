mod auth;
mod categories;
mod expenses;
mod subcategories;

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use auth::{login, LoginRequest, LoginResponse};
pub use categories::{
    create_category, get_category, list_categories, update_category, CategoryCreated,
};
pub use expenses::{create_expense, delete_expense, list_expenses, ExpenseCreated, ExpenseDeleted};
pub use subcategories::{
    create_subcategory, get_subcategory, subcategories_by_expense_count, update_subcategory,
    NewSubcategoryRequest, SubcategoryCreated,
};

use crate::error::ApiError;

/// Body of every create and rename request that only carries a name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NameRequest {
    pub name: String,
}

/// Reply to a successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renamed {
    pub message: String,
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn root() -> &'static str {
    "API is running. Use /api/v1/ for versioned endpoints."
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        message: "API is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Trims a name and enforces a minimum length in characters.
fn require_name(raw: &str, what: &str, min_len: usize) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::Validation(format!("{what} name is required")));
    }
    if name.chars().count() < min_len {
        return Err(ApiError::Validation(format!(
            "{what} name must be at least {min_len} characters long"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_length_checked() {
        assert_eq!(require_name("  Food ", "Category", 3).unwrap(), "Food");
        assert!(matches!(
            require_name("   ", "Category", 1),
            Err(ApiError::Validation(msg)) if msg == "Category name is required"
        ));
        assert!(matches!(
            require_name("Ab", "Subcategory", 3),
            Err(ApiError::Validation(msg)) if msg == "Subcategory name must be at least 3 characters long"
        ));
        // counted in characters, not bytes
        assert!(require_name("Café", "Category", 4).is_ok());
    }
}
