use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewExpense {
    pub amount: Decimal,
    pub subcategory_id: i64,
    pub user_id: Option<i64>,
    pub note: Option<String>,
}
