use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryDetail {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
}

// How often a subcategory is used; unused ones report 0
#[derive(FromRow, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryUsage {
    pub subcategory_id: i64,
    pub subcategory_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub expense_count: i64,
}
