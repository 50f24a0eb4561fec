mod common;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use expense_tracker::backend::{
    self, create_category, create_subcategory, get_category, get_subcategory, list_categories,
    subcategories_by_expense_count, update_category, update_subcategory, NameRequest,
    NewSubcategoryRequest,
};
use expense_tracker::error::ApiError;

fn name(value: &str) -> Result<Json<NameRequest>, axum::extract::rejection::JsonRejection> {
    Ok(Json(NameRequest { name: value.into() }))
}

fn new_subcategory(
    value: &str,
    category_id: i64,
) -> Result<Json<NewSubcategoryRequest>, axum::extract::rejection::JsonRejection> {
    Ok(Json(NewSubcategoryRequest {
        name: value.into(),
        category_id,
    }))
}

#[tokio::test]
async fn router_builds() {
    let state = common::test_state().await;
    let _router = backend::app(state);
}

#[tokio::test]
async fn empty_store_lists_no_categories() {
    let state = common::test_state().await;
    let Json(categories) = list_categories(State(state)).await.unwrap();
    assert_eq!(serde_json::to_value(&categories).unwrap(), json!([]));
}

#[tokio::test]
async fn categories_nest_their_subcategories() {
    let state = common::test_state().await;

    let (status, Json(food)) = create_category(State(state.clone()), name("Food"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(food.name, "Food");

    let (_, Json(transport)) = create_category(State(state.clone()), name("Transport"))
        .await
        .unwrap();

    let (status, Json(lunch)) = create_subcategory(State(state.clone()), new_subcategory("Lunch", food.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lunch.category_id, food.id);
    let (_, Json(dinner)) = create_subcategory(State(state.clone()), new_subcategory("Dinner", food.id))
        .await
        .unwrap();

    let Json(categories) = list_categories(State(state.clone())).await.unwrap();
    assert_eq!(
        serde_json::to_value(&categories).unwrap(),
        json!([
            {
                "id": food.id,
                "name": "Food",
                "subcategories": [
                    { "id": lunch.id, "name": "Lunch" },
                    { "id": dinner.id, "name": "Dinner" },
                ],
            },
            { "id": transport.id, "name": "Transport", "subcategories": [] },
        ])
    );

    let Json(single) = get_category(State(state.clone()), Ok(Path(transport.id)))
        .await
        .unwrap();
    assert_eq!(single.name, "Transport");
    assert!(single.subcategories.is_empty());

    let missing = get_category(State(state), Ok(Path(9_999))).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn category_names_are_validated_and_unique() {
    let state = common::test_state().await;

    let short = create_category(State(state.clone()), name("ab")).await;
    assert!(matches!(short, Err(ApiError::Validation(_))));

    create_category(State(state.clone()), name("Food")).await.unwrap();
    let duplicate = create_category(State(state.clone()), name("Food")).await;
    let err = duplicate.unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "Category name already exists");
}

#[tokio::test]
async fn renaming_a_category() {
    let state = common::test_state().await;
    let (_, Json(food)) = create_category(State(state.clone()), name("Food")).await.unwrap();
    let (_, Json(travel)) = create_category(State(state.clone()), name("Travel")).await.unwrap();

    let clash = update_category(State(state.clone()), Ok(Path(travel.id)), name("Food")).await;
    assert!(matches!(clash, Err(ApiError::Conflict(_))));

    // keeping its own name is not a clash
    let Json(same) = update_category(State(state.clone()), Ok(Path(food.id)), name("Food"))
        .await
        .unwrap();
    assert_eq!(same.name, "Food");

    let Json(renamed) = update_category(State(state.clone()), Ok(Path(travel.id)), name("Trips"))
        .await
        .unwrap();
    assert_eq!(renamed.id, travel.id);
    assert_eq!(renamed.message, "Category updated successfully");

    let empty = update_category(State(state.clone()), Ok(Path(travel.id)), name("  ")).await;
    assert!(matches!(empty, Err(ApiError::Validation(_))));

    let missing = update_category(State(state), Ok(Path(9_999)), name("Other")).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn subcategory_creation_rules() {
    let state = common::test_state().await;
    let food = common::category(&state.db, "Food").await;
    let travel = common::category(&state.db, "Travel").await;

    let bad_category = create_subcategory(State(state.clone()), new_subcategory("Lunch", 0)).await;
    assert!(matches!(bad_category, Err(ApiError::Validation(_))));

    let missing_category =
        create_subcategory(State(state.clone()), new_subcategory("Lunch", 9_999)).await;
    assert!(matches!(missing_category, Err(ApiError::NotFound(_))));

    let short = create_subcategory(State(state.clone()), new_subcategory("Al", food)).await;
    assert!(matches!(short, Err(ApiError::Validation(_))));

    create_subcategory(State(state.clone()), new_subcategory("Snacks", food))
        .await
        .unwrap();
    let duplicate = create_subcategory(State(state.clone()), new_subcategory("Snacks", food)).await;
    assert!(matches!(duplicate, Err(ApiError::Conflict(_))));

    // same name under another category is fine
    create_subcategory(State(state), new_subcategory("Snacks", travel))
        .await
        .unwrap();
}

#[tokio::test]
async fn subcategory_lookup_and_rename() {
    let state = common::test_state().await;
    let food = common::category(&state.db, "Food").await;
    let lunch = common::subcategory(&state.db, food, "Lunch").await;
    let dinner = common::subcategory(&state.db, food, "Dinner").await;

    let Json(detail) = get_subcategory(State(state.clone()), Ok(Path(lunch)))
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&detail).unwrap(),
        json!({ "id": lunch, "name": "Lunch", "category_id": food, "category_name": "Food" })
    );

    let clash = update_subcategory(State(state.clone()), Ok(Path(dinner)), name("Lunch")).await;
    assert!(matches!(clash, Err(ApiError::Conflict(_))));

    let Json(renamed) = update_subcategory(State(state.clone()), Ok(Path(dinner)), name("Supper"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Supper");

    let missing = update_subcategory(State(state.clone()), Ok(Path(9_999)), name("Brunch")).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));

    let missing = get_subcategory(State(state), Ok(Path(9_999))).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn usage_report_counts_expenses_per_subcategory() {
    let state = common::test_state().await;
    let food = common::category(&state.db, "Food").await;
    let lunch = common::subcategory(&state.db, food, "Lunch").await;
    let dinner = common::subcategory(&state.db, food, "Dinner").await;
    common::expense(&state.db, 5.0, dinner, None, None, "2024-03-01 10:00:00").await;
    common::expense(&state.db, 7.0, dinner, None, None, "2024-03-02 10:00:00").await;

    let Json(usage) = subcategories_by_expense_count(State(state)).await.unwrap();
    let counts: Vec<(i64, i64)> = usage
        .iter()
        .map(|u| (u.subcategory_id, u.expense_count))
        .collect();
    assert_eq!(counts, vec![(dinner, 2), (lunch, 0)]);
    assert!(usage.iter().all(|u| u.category_name == "Food"));
}
