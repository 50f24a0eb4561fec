use chrono::NaiveDateTime;
use serde::Serialize;

/// One expense with its denormalized join fields.
///
/// Optional fields serialize as `null` when the joined row is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
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

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedExpense {
    pub group_id: i64,
    pub group_name: String,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalAmount {
    pub total_amount: f64,
}

impl TotalAmount {
    /// `SUM()` over no rows is NULL; report it as zero.
    pub fn from_sum(sum: Option<f64>) -> Self {
        TotalAmount {
            total_amount: sum.unwrap_or(0.0),
        }
    }
}

/// Body of `GET /api/v1/expenses`, one variant per query mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpenseListing {
    Rows(Vec<ExpenseRecord>),
    Total(TotalAmount),
    Groups(Vec<GroupedExpense>),
}
