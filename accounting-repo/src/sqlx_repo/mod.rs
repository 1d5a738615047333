mod category_repo;
mod expense_repo;
mod user_repo;

use crate::category_repo::CategoryRepo;
use crate::expense_repo::ExpenseRepo;
use crate::sqlx_repo::category_repo::SQLxCategoryRepo;
use crate::sqlx_repo::expense_repo::SQLxExpenseRepo;
use crate::sqlx_repo::user_repo::SQLxUserRepo;
use crate::user_repo::UserRepo;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_repos(
    database_url: &str,
    max_pool_size: u32,
) -> Result<(Arc<dyn UserRepo>, Arc<dyn ExpenseRepo>, Arc<dyn CategoryRepo>), anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(database_url)
        .await
        .context("Unable to connect to database")?;

    sync_schema(&pool).await.context("Unable to sync schema")?;

    let user_repo = SQLxUserRepo::new(pool.clone());
    let expense_repo = SQLxExpenseRepo::new(pool.clone());
    let category_repo = SQLxCategoryRepo::new(pool);
    Ok((
        Arc::new(user_repo),
        Arc::new(expense_repo),
        Arc::new(category_repo),
    ))
}

/// Creates missing tables on startup, the sole schema management this
/// service does.
async fn sync_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS expenses (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL,
            spent_at DATE NOT NULL,
            title TEXT NOT NULL,
            amount NUMERIC NOT NULL,
            category TEXT,
            note TEXT
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}
