use crate::category_repo::CategoryRepo;
use crate::expense_repo::ExpenseRepo;
use crate::user_repo::UserRepo;
use std::sync::Arc;

mod category_repo;
mod expense_repo;
mod user_repo;

pub fn create_repos() -> (Arc<dyn UserRepo>, Arc<dyn ExpenseRepo>, Arc<dyn CategoryRepo>) {
    let user_repo = user_repo::MemUserRepo::new();
    let expense_repo = expense_repo::MemExpenseRepo::new();
    let category_repo = category_repo::MemCategoryRepo::new();

    (
        Arc::new(user_repo),
        Arc::new(expense_repo),
        Arc::new(category_repo),
    )
}
