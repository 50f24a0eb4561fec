use axum::{
    routing::{delete, get, post},
    Router,
};
use crate::backend::{handlers, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .patch(handlers::update_category),
        )
        .route("/subcategories", post(handlers::create_subcategory))
        .route(
            "/subcategories/:id",
            get(handlers::get_subcategory)
                .put(handlers::update_subcategory)
                .patch(handlers::update_subcategory),
        )
        .route(
            "/subcategories-by-expense-count",
            get(handlers::subcategories_by_expense_count),
        )
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/:id", delete(handlers::delete_expense))
}
