extern crate rstest;
extern crate serde_json;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use tracing::instrument;

use accounting_repo::category_repo::CategoryRepo;
use accounting_repo::expense_repo::{Expense, ExpenseRepo, NewExpense};
use accounting_repo::user_repo::{User, UserRepo};
use utils::repos;
use utils::tracing_setup;

#[macro_use]
mod utils;

type Repos = (Arc<dyn UserRepo>, Arc<dyn ExpenseRepo>, Arc<dyn CategoryRepo>);

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_create_user_stores_name_as_given(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    // User names are not trimmed on storage, only checked for emptiness.
    let user: User = create_user!(&service, " Alice ");
    assert!(user.id >= 1);
    assert_eq!(user.name, " Alice ");

    let request = TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: User = test::read_body_json(response).await;
    assert_eq!(fetched, user);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_create_user_rejects_blank_name(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let request = TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({ "name": "   " }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({}))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_get_all_users(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/users").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = test::read_body_json(response).await;
    assert!(users.is_empty());

    let alice: User = create_user!(&service, "Alice");
    let bob: User = create_user!(&service, "Bob");

    let request = TestRequest::get().uri("/users").to_request();
    let response = test::call_service(&service, request).await;
    let users: Vec<User> = test::read_body_json(response).await;
    assert_eq!(users, vec![alice, bob]);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_get_user_failures(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/users/404").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::get().uri("/users/not-a-number").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_update_user_merges_fields(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let user: User = create_user!(&service, "Alice");

    // An empty body changes nothing.
    let request = TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .set_json(serde_json::json!({}))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let unchanged: User = test::read_body_json(response).await;
    assert_eq!(unchanged, user);

    // A blank name is rejected and nothing is stored.
    let request = TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .set_json(serde_json::json!({ "name": " " }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An explicit null name is rejected too, not treated as omitted.
    let request = TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .set_json(serde_json::json!({ "name": null }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    let stored: User = test::read_body_json(response).await;
    assert_eq!(stored, user);

    let request = TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .set_json(serde_json::json!({ "name": "Alicia" }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = test::read_body_json(response).await;
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name, "Alicia");

    let request = TestRequest::patch().uri("/users/999").set_json(serde_json::json!({ "name": "Nobody" })).to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_delete_user(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let user: User = create_user!(&service, "Alice");

    let request = TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_delete_user_leaves_expenses_in_place(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let user: User = create_user!(&service, "Alice");
    let new_expense = NewExpense {
        user_id: user.id,
        spent_at: "2024-03-05".parse::<NaiveDate>().unwrap(),
        title: "Lunch".to_string(),
        amount: Decimal::from(12),
        category: None,
        note: None,
    };
    let expense: Expense = create_expense!(&service, new_expense);

    let request = TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // No cascade: the expense keeps its now dangling user reference.
    let request = TestRequest::get()
        .uri(&format!("/expenses/{}", expense.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Expense = test::read_body_json(response).await;
    assert_eq!(fetched.user_id, user.id);
}
