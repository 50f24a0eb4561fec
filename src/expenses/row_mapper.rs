//! Row shapes returned by the listing queries and their conversion into
//! response records.

use chrono::NaiveDateTime;
use sqlx::FromRow;

use super::response::{ExpenseRecord, GroupedExpense};
use crate::database::models::{Category, Subcategory};

/// One row of the detailed listing. Join columns are nullable.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: i64,
    pub amount: f64,
    pub subcategory_id: i64,
    pub user_id: Option<i64>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub user_email: Option<String>,
    pub subcategory_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl From<ExpenseRow> for ExpenseRecord {
    fn from(row: ExpenseRow) -> Self {
        ExpenseRecord {
            id: row.id,
            amount: row.amount,
            subcategory_id: row.subcategory_id,
            user_id: row.user_id,
            note: row.note,
            created_at: row.created_at,
            user_email: row.user_email,
            subcategory_name: row.subcategory_name,
            category_id: row.category_id,
            category_name: row.category_name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct GroupRow {
    pub group_id: i64,
    pub group_name: String,
    pub total_amount: f64,
    pub expense_count: i64,
}

impl From<GroupRow> for GroupedExpense {
    fn from(row: GroupRow) -> Self {
        GroupedExpense {
            group_id: row.group_id,
            group_name: row.group_name,
            total: row.total_amount,
            count: row.expense_count,
        }
    }
}

/// A category joined with at most one of its subcategories.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub category_id: i64,
    pub category_name: String,
    pub subcategory_id: Option<i64>,
    pub subcategory_name: Option<String>,
}

/// Folds rows ordered by category id into categories with nested subcategories.
///
/// Consecutive rows with the same category id extend the same category. A
/// category whose only row carries no subcategory keeps an empty list.
pub fn fold_categories<I>(rows: I) -> Vec<Category>
where
    I: IntoIterator<Item = CategoryRow>,
{
    let mut categories: Vec<Category> = Vec::new();

    for row in rows {
        let starts_new = categories
            .last()
            .map_or(true, |current| current.id != row.category_id);
        if starts_new {
            categories.push(Category {
                id: row.category_id,
                name: row.category_name,
                subcategories: Vec::new(),
            });
        }

        if let (Some(id), Some(name)) = (row.subcategory_id, row.subcategory_name) {
            if let Some(current) = categories.last_mut() {
                current.subcategories.push(Subcategory { id, name });
            }
        }
    }

    categories
}
