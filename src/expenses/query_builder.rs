//! Translates a validated [`ExpenseFilter`] into one parameterized SQLite
//! statement.
//!
//! Predicates are collected as typed fragments first and rendered second, so
//! the positional arguments are always pushed in the same order as their
//! placeholders appear in the text.

use chrono::NaiveDate;

use super::params::{ExpenseFilter, GroupBy, OrderBy, QueryMode, TaxonomyFilter, UserFilter};

/// A positional argument bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    /// Bound as `YYYY-MM-DD` text, compared against `DATE(created_at)`.
    Date(NaiveDate),
}

/// SQL text plus the arguments for its placeholders, in order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Sql {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Sql {
    pub fn new() -> Sql {
        Sql::default()
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn append_param(&mut self, param: Param) {
        self.sql.push('?');
        self.params.push(param);
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// One condition of the WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    UserIsNull,
    UserEquals(i64),
    CategoryIn {
        /// `sc.category_id` or `s.category_id`, depending on which join is present.
        column: &'static str,
        ids: Vec<i64>,
    },
    SubcategoryIn(Vec<i64>),
    CreatedOnOrAfter(NaiveDate),
    CreatedOnOrBefore(NaiveDate),
}

impl Predicate {
    fn render(&self, sql: &mut Sql) {
        match self {
            Predicate::UserIsNull => sql.append_syntax("e.user_id IS NULL"),
            Predicate::UserEquals(id) => {
                sql.append_syntax("e.user_id = ");
                sql.append_param(Param::Int(*id));
            }
            Predicate::CategoryIn { column, ids } => {
                sql.append_syntax(column);
                render_in_list(sql, ids);
            }
            Predicate::SubcategoryIn(ids) => {
                sql.append_syntax("e.subcategory_id");
                render_in_list(sql, ids);
            }
            Predicate::CreatedOnOrAfter(date) => {
                sql.append_syntax("DATE(e.created_at) >= ");
                sql.append_param(Param::Date(*date));
            }
            Predicate::CreatedOnOrBefore(date) => {
                sql.append_syntax("DATE(e.created_at) <= ");
                sql.append_param(Param::Date(*date));
            }
        }
    }
}

fn render_in_list(sql: &mut Sql, ids: &[i64]) {
    sql.append_syntax(" IN (");
    for (index, id) in ids.iter().enumerate() {
        if index > 0 {
            sql.append_syntax(", ");
        }
        sql.append_param(Param::Int(*id));
    }
    sql.append_syntax(")");
}

/// A statement ready to run, tagged with the result shape it produces.
#[derive(Debug, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub mode: QueryMode,
    pub sql: Sql,
}

const ROW_SELECT: &str = "SELECT e.id, e.amount, e.subcategory_id, e.user_id, e.note, e.created_at, \
     u.email AS user_email, s.name AS subcategory_name, c.id AS category_id, c.name AS category_name \
     FROM expenses e \
     LEFT JOIN users u ON e.user_id = u.id \
     LEFT JOIN subcategories s ON e.subcategory_id = s.id \
     LEFT JOIN categories c ON s.category_id = c.id";

const TOTAL_SELECT: &str = "SELECT SUM(e.amount) AS total_amount FROM expenses e";

const GROUP_AGGREGATES: &str = "SUM(e.amount) AS total_amount, COUNT(*) AS expense_count";

const CATEGORY_JOIN: &str = " JOIN subcategories sc ON e.subcategory_id = sc.id";

pub fn build_expense_query(filter: &ExpenseFilter) -> ExpenseQuery {
    let mode = filter.mode();
    let mut sql = Sql::new();

    // grouping by category or subcategory already joins `s`
    let joins_subcategory = matches!(
        mode,
        QueryMode::Grouped(GroupBy::Category | GroupBy::Subcategory)
    );
    let category_column = if joins_subcategory {
        "s.category_id"
    } else {
        "sc.category_id"
    };
    let predicates = predicates(filter, category_column);
    let needs_category_join = !joins_subcategory
        && predicates
            .iter()
            .any(|p| matches!(p, Predicate::CategoryIn { .. }));

    match mode {
        QueryMode::Rows => sql.append_syntax(ROW_SELECT),
        QueryMode::Total => sql.append_syntax(TOTAL_SELECT),
        QueryMode::Grouped(group_by) => append_group_select(&mut sql, group_by),
    }
    if needs_category_join {
        sql.append_syntax(CATEGORY_JOIN);
    }

    append_where(&mut sql, &predicates);

    match mode {
        QueryMode::Rows => {
            let column = match filter.order_by {
                OrderBy::Amount => "e.amount",
                OrderBy::Date => "e.created_at",
            };
            let dir = filter.order_dir.as_sql();
            sql.append_syntax(&format!(" ORDER BY {column} {dir}, e.id {dir}"));
        }
        QueryMode::Total => {}
        QueryMode::Grouped(group_by) => {
            sql.append_syntax(match group_by {
                GroupBy::Category => " GROUP BY c.id, c.name",
                GroupBy::Subcategory => " GROUP BY s.id, s.name",
                GroupBy::User => " GROUP BY e.user_id, u.display_name, u.email",
            });
            let dir = filter.order_dir.as_sql();
            sql.append_syntax(&format!(" ORDER BY total_amount {dir}, group_id ASC"));
        }
    }

    ExpenseQuery { mode, sql }
}

/// Predicates in their fixed order: user, category/subcategory, date_from, date_to.
pub fn predicates(filter: &ExpenseFilter, category_column: &'static str) -> Vec<Predicate> {
    let mut out = Vec::new();

    match filter.user {
        Some(UserFilter::Unassigned) => out.push(Predicate::UserIsNull),
        Some(UserFilter::Is(id)) => out.push(Predicate::UserEquals(id)),
        None => {}
    }

    match &filter.taxonomy {
        Some(TaxonomyFilter::Categories(ids)) if !ids.is_empty() => {
            out.push(Predicate::CategoryIn {
                column: category_column,
                ids: ids.clone(),
            });
        }
        Some(TaxonomyFilter::Subcategories(ids)) if !ids.is_empty() => {
            out.push(Predicate::SubcategoryIn(ids.clone()));
        }
        _ => {}
    }

    if let Some(date) = filter.date_from {
        out.push(Predicate::CreatedOnOrAfter(date));
    }
    if let Some(date) = filter.date_to {
        out.push(Predicate::CreatedOnOrBefore(date));
    }

    out
}

fn append_group_select(sql: &mut Sql, group_by: GroupBy) {
    let select = match group_by {
        GroupBy::Category => {
            "SELECT c.id AS group_id, c.name AS group_name, {aggregates} \
             FROM expenses e \
             JOIN subcategories s ON e.subcategory_id = s.id \
             JOIN categories c ON s.category_id = c.id"
        }
        GroupBy::Subcategory => {
            "SELECT s.id AS group_id, s.name AS group_name, {aggregates} \
             FROM expenses e \
             JOIN subcategories s ON e.subcategory_id = s.id"
        }
        GroupBy::User => {
            "SELECT COALESCE(e.user_id, 0) AS group_id, \
             COALESCE(u.display_name, u.email, 'Unknown User') AS group_name, {aggregates} \
             FROM expenses e \
             LEFT JOIN users u ON e.user_id = u.id"
        }
    };
    sql.append_syntax(&select.replace("{aggregates}", GROUP_AGGREGATES));
}

fn append_where(sql: &mut Sql, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        sql.append_syntax(if index == 0 { " WHERE " } else { " AND " });
        predicate.render(sql);
    }
}
