use crate::error::HandlerError;
use crate::expense::filter::ExpenseQuery;
use crate::parse_id;
use accounting_repo::expense_repo::{ExpenseRepo, ExpenseUpdate, NewExpense};
use accounting_repo::user_repo::{UserRepo, UserRepoError};
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

#[get("")]
pub async fn get_all_expenses(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    request: HttpRequest,
) -> Result<impl Responder, HandlerError> {
    let query = ExpenseQuery::from_query_string(request.query_string())?;
    let expenses = expense_repo
        .get_all_expenses(query.filter, query.page_options)
        .await?;
    Ok(HttpResponse::Ok().json(expenses))
}

#[post("")]
pub async fn create_new_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_repo: web::Data<Arc<dyn UserRepo>>,
    new_expense: web::Json<NewExpense>,
) -> Result<impl Responder, HandlerError> {
    let mut new_expense = new_expense.into_inner();
    if new_expense.title.is_empty() {
        return Err(HandlerError::Validation);
    }

    // A missing referenced user is a bad request, not a missing resource.
    match user_repo.get_user(new_expense.user_id).await {
        Ok(_) => {}
        Err(UserRepoError::UserNotFound(_)) => return Err(HandlerError::Validation),
        Err(e) => return Err(e.into()),
    }

    // An empty note is stored as no note at all.
    new_expense.note = new_expense.note.filter(|note| !note.is_empty());

    let expense = expense_repo.create_new_expense(new_expense).await?;
    Ok(HttpResponse::Created().json(expense))
}

#[get("/{expense_id}")]
pub async fn get_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let expense_id = parse_id(&params)?;

    let expense = expense_repo.get_expense(expense_id).await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[patch("/{expense_id}")]
pub async fn update_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    params: web::Path<String>,
    update: web::Json<ExpenseUpdate>,
) -> Result<impl Responder, HandlerError> {
    let expense_id = parse_id(&params)?;

    let expense = expense_repo
        .update_expense(expense_id, update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[delete("/{expense_id}")]
pub async fn delete_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    params: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let expense_id = parse_id(&params)?;

    expense_repo.delete_expense(expense_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
