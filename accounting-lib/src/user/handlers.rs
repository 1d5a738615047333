use crate::error::HandlerError;
use crate::parse_id;
use accounting_repo::user_repo::{NewUser, UserRepo, UserUpdate};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use std::sync::Arc;

#[get("")]
pub async fn get_all_users(
    user_repo: web::Data<Arc<dyn UserRepo>>,
) -> Result<impl Responder, HandlerError> {
    let users = user_repo.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("")]
pub async fn create_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    new_user: web::Json<NewUser>,
) -> Result<impl Responder, HandlerError> {
    let new_user = new_user.into_inner();
    if new_user.name.trim().is_empty() {
        return Err(HandlerError::Validation);
    }

    // The name is stored as given; only the emptiness check trims.
    let user = user_repo.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let user_id = parse_id(&params)?;

    let user = user_repo.get_user(user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[patch("/{user_id}")]
pub async fn update_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    params: web::Path<String>,
    update: web::Json<UserUpdate>,
) -> Result<impl Responder, HandlerError> {
    let user_id = parse_id(&params)?;

    let update = update.into_inner();
    // A present name must be a non-blank string; an explicit null is just as
    // invalid as a blank one.
    match &update.name {
        Some(Some(name)) if !name.trim().is_empty() => {}
        Some(_) => return Err(HandlerError::Validation),
        None => {}
    }

    let user = user_repo.update_user(user_id, update).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let user_id = parse_id(&params)?;

    user_repo.delete_user(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
