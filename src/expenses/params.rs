use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Raw query string of `GET /api/v1/expenses`.
///
/// Every field is kept as text so that malformed values surface as our own
/// validation errors instead of an extractor rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExpenseQueryParams {
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub group_by: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
    pub aggregates_only: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cannot use both category_id and subcategory_id in the same query")]
    ConflictingTaxonomyFilters,
    #[error("Invalid {0} parameter")]
    InvalidInteger(&'static str),
    #[error("Invalid {0} parameter. Must be in YYYY-MM-DD format")]
    InvalidDate(&'static str),
    #[error("Invalid order_by parameter. Must be 'amount' or 'date'")]
    InvalidOrderBy,
    #[error("Invalid order_dir parameter. Must be 'asc' or 'desc'")]
    InvalidOrderDir,
    #[error("Invalid group_by parameter. Must be 'category', 'subcategory', or 'user'")]
    InvalidGroupBy,
    #[error("Invalid aggregates_only parameter. Must be 'true' or 'false'")]
    InvalidAggregatesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilter {
    /// `user_id=0`: expenses not attached to any user.
    Unassigned,
    Is(i64),
}

/// Category and subcategory filters exclude each other, so only one can be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyFilter {
    Categories(Vec<i64>),
    Subcategories(Vec<i64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    Subcategory,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Amount,
    #[default]
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    Asc,
    #[default]
    Desc,
}

impl OrderDir {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// What shape of result a listing request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Rows,
    Total,
    Grouped(GroupBy),
}

/// Validated listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub user: Option<UserFilter>,
    pub taxonomy: Option<TaxonomyFilter>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub group_by: Option<GroupBy>,
    pub order_by: OrderBy,
    pub order_dir: OrderDir,
    pub aggregates_only: bool,
}

impl ExpenseFilter {
    /// `group_by` wins over `aggregates_only` when both are supplied.
    pub fn mode(&self) -> QueryMode {
        match (self.group_by, self.aggregates_only) {
            (Some(group_by), _) => QueryMode::Grouped(group_by),
            (None, true) => QueryMode::Total,
            (None, false) => QueryMode::Rows,
        }
    }
}

impl TryFrom<ExpenseQueryParams> for ExpenseFilter {
    type Error = ValidationError;

    fn try_from(params: ExpenseQueryParams) -> Result<Self, Self::Error> {
        let category_id = non_empty(params.category_id.as_deref());
        let subcategory_id = non_empty(params.subcategory_id.as_deref());

        let taxonomy = match (category_id, subcategory_id) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingTaxonomyFilters),
            (Some(raw), None) => Some(TaxonomyFilter::Categories(parse_id_list(raw, "category_id")?)),
            (None, Some(raw)) => Some(TaxonomyFilter::Subcategories(parse_id_list(
                raw,
                "subcategory_id",
            )?)),
            (None, None) => None,
        };

        let order_by = match non_empty(params.order_by.as_deref()) {
            None => OrderBy::default(),
            Some("amount") => OrderBy::Amount,
            Some("date") => OrderBy::Date,
            Some(_) => return Err(ValidationError::InvalidOrderBy),
        };

        let order_dir = match non_empty(params.order_dir.as_deref()) {
            None => OrderDir::default(),
            Some("asc") => OrderDir::Asc,
            Some("desc") => OrderDir::Desc,
            Some(_) => return Err(ValidationError::InvalidOrderDir),
        };

        let date_from = parse_date(params.date_from.as_deref(), "date_from")?;
        let date_to = parse_date(params.date_to.as_deref(), "date_to")?;

        let group_by = match non_empty(params.group_by.as_deref()) {
            None => None,
            Some("category") => Some(GroupBy::Category),
            Some("subcategory") => Some(GroupBy::Subcategory),
            Some("user") => Some(GroupBy::User),
            Some(_) => return Err(ValidationError::InvalidGroupBy),
        };

        let aggregates_only = match non_empty(params.aggregates_only.as_deref()) {
            None | Some("false") => false,
            Some("true") => true,
            Some(_) => return Err(ValidationError::InvalidAggregatesOnly),
        };

        let user = match non_empty(params.user_id.as_deref()) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(0) => Some(UserFilter::Unassigned),
                Ok(id) => Some(UserFilter::Is(id)),
                Err(_) => return Err(ValidationError::InvalidInteger("user_id")),
            },
        };

        Ok(ExpenseFilter {
            user,
            taxonomy,
            date_from,
            date_to,
            group_by,
            order_by,
            order_dir,
            aggregates_only,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses `"1, 2,,3"` into `[1, 2, 3]`. Blank entries are skipped.
pub fn parse_id_list(raw: &str, field: &'static str) -> Result<Vec<i64>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| ValidationError::InvalidInteger(field))
        })
        .collect()
}

fn parse_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    // chrono accepts single-digit months and days; the wire format does not
    if raw.len() != 10 {
        return Err(ValidationError::InvalidDate(field));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(field))
}
