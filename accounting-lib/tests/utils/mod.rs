use std::sync::Arc;

use rstest::*;
use tracing::info;
use tracing::Level;

use accounting_repo::category_repo::CategoryRepo;
use accounting_repo::expense_repo::ExpenseRepo;
use accounting_repo::user_repo::UserRepo;

macro_rules! build_app {
    ($user_repo:ident, $expense_repo:ident, $category_repo:ident) => {{
        let app = App::new()
            .app_data(Data::new($user_repo))
            .app_data(Data::new($expense_repo))
            .app_data(Data::new($category_repo))
            .wrap(accounting_lib::tracing::create_middleware())
            .service(accounting_lib::user::user_service())
            .service(accounting_lib::expense::expense_service())
            .service(accounting_lib::category::category_service());
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_user {
    (&$service:ident, $name:expr) => {{
        let request = TestRequest::post()
            .uri("/users")
            .set_json(serde_json::json!({ "name": $name }))
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating user",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

macro_rules! create_category {
    (&$service:ident, $name:expr) => {{
        let request = TestRequest::post()
            .uri("/categories")
            .set_json(serde_json::json!({ "name": $name }))
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating category",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

macro_rules! create_expense {
    (&$service:ident, $new_expense:expr) => {{
        let request = TestRequest::post()
            .uri("/expenses")
            .set_json(&$new_expense)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating expense",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> (Arc<dyn UserRepo>, Arc<dyn ExpenseRepo>, Arc<dyn CategoryRepo>) {
    accounting_repo::mem_repo::create_repos()
}
