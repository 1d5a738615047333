pub mod category_repo;
pub mod expense_repo;
mod serde_util;
pub mod user_repo;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;
