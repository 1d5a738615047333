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
async fn test_get_expense_round_trip(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let user: User = create_user!(&service, "Alice");
    let new_expense = NewExpense {
        user_id: user.id,
        spent_at: "2024-03-05".parse::<NaiveDate>().unwrap(),
        title: "Groceries".to_string(),
        amount: Decimal::new(999, 2),
        category: Some("food".to_string()),
        note: Some("card".to_string()),
    };
    let created: Expense = create_expense!(&service, new_expense);

    let request = TestRequest::get()
        .uri(&format!("/expenses/{}", created.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Expense = test::read_body_json(response).await;
    assert_eq!(fetched, created);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_get_expense_failures(_tracing_setup: &(), repos: Repos) {
    let (user_repo, expense_repo, category_repo) = repos;
    let app = build_app!(user_repo, expense_repo, category_repo);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/expenses/404").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::get().uri("/expenses/nope").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
