use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, Pool, Sqlite};

use crate::database::models::{
    Category, NewExpense, NewUser, SubcategoryDetail, SubcategoryUsage, User,
};
use crate::expenses::query_builder::{ExpenseQuery, Param};
use crate::expenses::response::{ExpenseListing, TotalAmount};
use crate::expenses::row_mapper::{fold_categories, CategoryRow, ExpenseRow, GroupRow};
use crate::expenses::QueryMode;

/*
This file contains the SQL queries and the CRUD (Create, Read, Update, Delete)
logic for categories, subcategories, expenses and users.
 */

/*==========Category Queries=========== */

// Get all categories together with their subcategories
pub async fn get_all_categories(pool: &Pool<Sqlite>) -> Result<Vec<Category>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT
            c.id   AS category_id,
            c.name AS category_name,
            s.id   AS subcategory_id,
            s.name AS subcategory_name
        FROM categories c
        LEFT JOIN subcategories s ON c.id = s.category_id
        ORDER BY c.id, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(fold_categories(rows))
}

// Get one category by id, None if it does not exist
pub async fn get_category_by_id(
    pool: &Pool<Sqlite>,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT
            c.id   AS category_id,
            c.name AS category_name,
            s.id   AS subcategory_id,
            s.name AS subcategory_name
        FROM categories c
        LEFT JOIN subcategories s ON c.id = s.category_id
        WHERE c.id = ?
        ORDER BY s.id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(fold_categories(rows).into_iter().next())
}

pub async fn category_exists(pool: &Pool<Sqlite>, category_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

// Is the name used by a category other than `except_id`?
pub async fn category_name_taken(
    pool: &Pool<Sqlite>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM categories WHERE name = ? AND id IS NOT ?")
            .bind(name)
            .bind(except_id)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

// Create a category
pub async fn create_category(pool: &Pool<Sqlite>, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
}

// Rename a category, false if no such category
pub async fn update_category(
    pool: &Pool<Sqlite>,
    category_id: i64,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
        .bind(name)
        .bind(category_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Subcategory Queries=========== */

pub async fn get_subcategory_by_id(
    pool: &Pool<Sqlite>,
    subcategory_id: i64,
) -> Result<Option<SubcategoryDetail>, sqlx::Error> {
    sqlx::query_as::<_, SubcategoryDetail>(
        r#"
        SELECT s.id, s.name, s.category_id, c.name AS category_name
        FROM subcategories s
        JOIN categories c ON s.category_id = c.id
        WHERE s.id = ?
        "#,
    )
    .bind(subcategory_id)
    .fetch_optional(pool)
    .await
}

pub async fn subcategory_exists(
    pool: &Pool<Sqlite>,
    subcategory_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM subcategories WHERE id = ?")
        .bind(subcategory_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

// Is the name already used inside `category_id`?
pub async fn subcategory_name_taken(
    pool: &Pool<Sqlite>,
    category_id: i64,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM subcategories WHERE name = ? AND category_id = ?")
            .bind(name)
            .bind(category_id)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

// Would renaming `subcategory_id` clash with a sibling in the same category?
pub async fn subcategory_rename_clashes(
    pool: &Pool<Sqlite>,
    subcategory_id: i64,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM subcategories
        WHERE name = ?
          AND category_id = (SELECT category_id FROM subcategories WHERE id = ?)
          AND id != ?
        "#,
    )
    .bind(name)
    .bind(subcategory_id)
    .bind(subcategory_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

// Create a subcategory inside an existing category
pub async fn create_subcategory(
    pool: &Pool<Sqlite>,
    name: &str,
    category_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO subcategories (name, category_id) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(category_id)
        .fetch_one(pool)
        .await
}

pub async fn update_subcategory(
    pool: &Pool<Sqlite>,
    subcategory_id: i64,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE subcategories SET name = ? WHERE id = ?")
        .bind(name)
        .bind(subcategory_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Every subcategory with the number of expenses filed under it, most used first
pub async fn subcategories_by_expense_count(
    pool: &Pool<Sqlite>,
) -> Result<Vec<SubcategoryUsage>, sqlx::Error> {
    sqlx::query_as::<_, SubcategoryUsage>(
        r#"
        SELECT
            s.id   AS subcategory_id,
            s.name AS subcategory_name,
            c.id   AS category_id,
            c.name AS category_name,
            COUNT(e.id) AS expense_count
        FROM subcategories s
        JOIN categories c ON s.category_id = c.id
        LEFT JOIN expenses e ON s.id = e.subcategory_id
        GROUP BY s.id, s.name, c.id, c.name
        ORDER BY expense_count DESC, s.id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/*==========Expense Queries=========== */

// Create an expense, stamped with the current time. `amount` is the REAL column value.
pub async fn create_expense(
    pool: &Pool<Sqlite>,
    amount: f64,
    expense: &NewExpense,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO expenses (amount, subcategory_id, user_id, note, created_at)
        VALUES (?, ?, ?, ?, datetime('now'))
        RETURNING id
        "#,
    )
    .bind(amount)
    .bind(expense.subcategory_id)
    .bind(expense.user_id)
    .bind(expense.note.as_deref())
    .fetch_one(pool)
    .await
}

// Delete an expense, false if no such expense
pub async fn delete_expense(pool: &Pool<Sqlite>, expense_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
        .bind(expense_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Run a built listing query and shape the rows for its mode
pub async fn list_expenses(
    pool: &Pool<Sqlite>,
    query: &ExpenseQuery,
) -> Result<ExpenseListing, sqlx::Error> {
    let sql = query.sql.sql.as_str();
    let args = bind_params(&query.sql.params);

    let listing = match query.mode {
        QueryMode::Rows => {
            let rows = sqlx::query_as_with::<_, ExpenseRow, _>(sql, args)
                .fetch_all(pool)
                .await?;
            ExpenseListing::Rows(rows.into_iter().map(Into::into).collect())
        }
        QueryMode::Total => {
            let sum: Option<f64> = sqlx::query_scalar_with(sql, args).fetch_one(pool).await?;
            ExpenseListing::Total(TotalAmount::from_sum(sum))
        }
        QueryMode::Grouped(_) => {
            let rows = sqlx::query_as_with::<_, GroupRow, _>(sql, args)
                .fetch_all(pool)
                .await?;
            ExpenseListing::Groups(rows.into_iter().map(Into::into).collect())
        }
    };

    Ok(listing)
}

fn bind_params<'q>(params: &[Param]) -> SqliteArguments<'q> {
    let mut args = SqliteArguments::default();
    for param in params {
        match param {
            Param::Int(value) => args.add(*value),
            Param::Date(date) => args.add(date.format("%Y-%m-%d").to_string()),
        }
    }
    args
}

/*==========User Queries=========== */

pub async fn get_user_by_email(pool: &Pool<Sqlite>, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, uid, email, display_name, created_at, password, role
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

// Create a user with an already hashed password
pub async fn create_user(pool: &Pool<Sqlite>, user: &NewUser) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (email, display_name, password, role, created_at)
        VALUES (?, ?, ?, ?, datetime('now'))
        RETURNING id
        "#,
    )
    .bind(&user.email)
    .bind(user.display_name.as_deref())
    .bind(&user.password_hash)
    .bind(&user.role)
    .fetch_one(pool)
    .await
}
