use crate::error::HandlerError;
use crate::parse_id;
use accounting_repo::category_repo::{CategoryRepo, CategoryUpdate, NewCategory};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use std::sync::Arc;

#[get("")]
pub async fn get_all_categories(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
) -> Result<impl Responder, HandlerError> {
    let categories = category_repo.get_all_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("")]
pub async fn create_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    new_category: web::Json<NewCategory>,
) -> Result<impl Responder, HandlerError> {
    let mut new_category = new_category.into_inner();
    let trimmed = new_category.name.trim();
    if trimmed.is_empty() {
        return Err(HandlerError::Validation);
    }
    // Unlike user names, category names are stored trimmed.
    new_category.name = trimmed.to_owned();

    let category = category_repo.create_category(new_category).await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/{category_id}")]
pub async fn get_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let category_id = parse_id(&params)?;

    let category = category_repo.get_category(category_id).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[patch("/{category_id}")]
pub async fn update_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    params: web::Path<String>,
    update: web::Json<CategoryUpdate>,
) -> Result<impl Responder, HandlerError> {
    let category_id = parse_id(&params)?;

    let mut update = update.into_inner();
    // A present name must be a non-blank string; an explicit null is just as
    // invalid as a blank one.
    if let Some(name) = &update.name {
        let trimmed = match name {
            Some(name) => name.trim(),
            None => return Err(HandlerError::Validation),
        };
        if trimmed.is_empty() {
            return Err(HandlerError::Validation);
        }
        update.name = Some(Some(trimmed.to_owned()));
    }

    let category = category_repo.update_category(category_id, update).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{category_id}")]
pub async fn delete_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let category_id = parse_id(&params)?;

    category_repo.delete_category(category_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
