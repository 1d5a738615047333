use actix_web::{web, Scope};

mod handlers;

pub fn user_service() -> Scope {
    web::scope("/users")
        .service(handlers::get_all_users)
        .service(handlers::create_user)
        .service(handlers::get_user)
        .service(handlers::update_user)
        .service(handlers::delete_user)
}
