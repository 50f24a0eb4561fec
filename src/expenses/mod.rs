//! Filtered expense listing: parameter validation, query construction, row
//! mapping and response shapes for `GET /api/v1/expenses`.

pub mod params;
pub mod query_builder;
pub mod response;
pub mod row_mapper;

pub use params::{
    ExpenseFilter, ExpenseQueryParams, GroupBy, OrderBy, OrderDir, QueryMode, TaxonomyFilter,
    UserFilter, ValidationError,
};
pub use query_builder::{build_expense_query, ExpenseQuery};
pub use response::{ExpenseListing, ExpenseRecord, GroupedExpense, TotalAmount};
