use actix_web::{web, Scope};

mod filter;
mod handlers;

pub fn expense_service() -> Scope {
    web::scope("/expenses")
        .service(handlers::get_all_expenses)
        .service(handlers::create_new_expense)
        .service(handlers::get_expense)
        .service(handlers::update_expense)
        .service(handlers::delete_expense)
}
