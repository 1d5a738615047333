use accounting_repo::category_repo::CategoryRepoError;
use accounting_repo::expense_repo::ExpenseRepoError;
use accounting_repo::user_repo::UserRepoError;
use actix_web::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Everything a handler can fail with. Errors never propagate past the
/// handler boundary; this type maps each failure to its response status.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid request")]
    Validation,
    #[error("{0}")]
    ValidationMessage(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Category name already exists")]
    DuplicateName,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<UserRepoError> for HandlerError {
    fn from(e: UserRepoError) -> Self {
        match e {
            UserRepoError::UserNotFound(_) => HandlerError::NotFound("User not found".to_owned()),
            UserRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<ExpenseRepoError> for HandlerError {
    fn from(e: ExpenseRepoError) -> Self {
        match e {
            ExpenseRepoError::ExpenseNotFound(_) => {
                HandlerError::NotFound("Expense not found".to_owned())
            }
            ExpenseRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<CategoryRepoError> for HandlerError {
    fn from(e: CategoryRepoError) -> Self {
        match e {
            CategoryRepoError::CategoryNotFound(_) => {
                HandlerError::NotFound("Category not found".to_owned())
            }
            CategoryRepoError::DuplicateName => HandlerError::DuplicateName,
            CategoryRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl ResponseError for HandlerError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            HandlerError::Validation => HttpResponse::BadRequest().finish(),
            HandlerError::ValidationMessage(message) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "message": message }))
            }
            HandlerError::NotFound(message) => {
                HttpResponse::NotFound().json(serde_json::json!({ "message": message }))
            }
            HandlerError::DuplicateName => HttpResponse::BadRequest()
                .json(serde_json::json!({ "message": "Category name already exists" })),
            HandlerError::Other(e) => {
                tracing::error!(error = %e, "Datastore failure");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "message": "Internal server error" }))
            }
        }
    }
}
