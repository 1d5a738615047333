use crate::expense_repo::ExpenseRepoError::ExpenseNotFound;
use crate::expense_repo::{
    Expense, ExpenseRepo, ExpenseRepoError, ExpenseUpdate, Filter, NewExpense, PageOptions,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

const EXPENSE_COLUMNS: &str = "id, user_id, spent_at, title, amount, category, note";

#[derive(sqlx::FromRow)]
struct ExpenseEntry {
    id: i32,
    user_id: i32,
    spent_at: NaiveDate,
    title: String,
    amount: Decimal,
    category: Option<String>,
    note: Option<String>,
}

impl From<ExpenseEntry> for Expense {
    fn from(value: ExpenseEntry) -> Self {
        Expense::new(
            value.id,
            value.user_id,
            value.spent_at,
            value.title,
            value.amount,
            value.category,
            value.note,
        )
    }
}

pub struct SQLxExpenseRepo {
    pool: PgPool,
}

impl SQLxExpenseRepo {
    pub fn new(pool: PgPool) -> SQLxExpenseRepo {
        SQLxExpenseRepo { pool }
    }
}

#[async_trait]
impl ExpenseRepo for SQLxExpenseRepo {
    #[instrument(skip(self))]
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let expense: Option<ExpenseEntry> = sqlx::query_as(
            "SELECT id, user_id, spent_at, title, amount, category, note \
             FROM expenses WHERE id = $1",
        )
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get expense {}", expense_id))?;
        expense.map(|e| e.into()).ok_or(ExpenseNotFound(expense_id))
    }

    #[instrument(skip(self))]
    async fn get_all_expenses(
        &self,
        filter: Filter,
        page_options: PageOptions,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        let mut query_builder = QueryBuilder::new(format!(
            "SELECT {} FROM expenses WHERE TRUE",
            EXPENSE_COLUMNS
        ));
        if let Some(user_id) = filter.user_id {
            query_builder.push(" AND user_id = ").push_bind(user_id);
        }
        if !filter.categories.is_empty() {
            query_builder.push(" AND category IN (");
            {
                let mut categories = query_builder.separated(", ");
                for category in filter.categories {
                    categories.push_bind(category);
                }
            }
            query_builder.push(")");
        }
        if let Some(from) = filter.from {
            query_builder.push(" AND spent_at >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query_builder.push(" AND spent_at <= ").push_bind(to);
        }
        query_builder.push(" ORDER BY id ASC");
        if let Some(limit) = page_options.limit {
            query_builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = page_options.offset {
            query_builder.push(" OFFSET ").push_bind(offset);
        }

        let query = query_builder.build_query_as::<ExpenseEntry>();
        let expenses: Vec<ExpenseEntry> = query
            .fetch_all(&self.pool)
            .await
            .context("Unable to get expenses")?;
        Ok(expenses.into_iter().map(|e| e.into()).collect())
    }

    #[instrument(skip(self, new_expense))]
    async fn create_new_expense(
        &self,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO expenses(user_id, spent_at, title, amount, category, note) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(new_expense.user_id)
        .bind(new_expense.spent_at)
        .bind(&new_expense.title)
        .bind(new_expense.amount)
        .bind(&new_expense.category)
        .bind(&new_expense.note)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert expense")?;
        Ok(new_expense.to_expense(id))
    }

    #[instrument(skip(self, update))]
    async fn update_expense(
        &self,
        expense_id: i32,
        update: ExpenseUpdate,
    ) -> Result<Expense, ExpenseRepoError> {
        if update.is_empty() {
            // Nothing to apply, but the row must still exist.
            return self.get_expense(expense_id).await;
        }

        let mut query_builder = QueryBuilder::new("UPDATE expenses SET ");
        {
            let mut assignments = query_builder.separated(", ");
            if let Some(spent_at) = update.spent_at {
                assignments
                    .push("spent_at = ")
                    .push_bind_unseparated(spent_at);
            }
            if let Some(title) = update.title {
                assignments.push("title = ").push_bind_unseparated(title);
            }
            if let Some(amount) = update.amount {
                assignments.push("amount = ").push_bind_unseparated(amount);
            }
            if let Some(category) = update.category {
                assignments
                    .push("category = ")
                    .push_bind_unseparated(category);
            }
            if let Some(note) = update.note {
                assignments.push("note = ").push_bind_unseparated(note);
            }
        }
        query_builder.push(" WHERE id = ").push_bind(expense_id);
        query_builder.push(format!(" RETURNING {}", EXPENSE_COLUMNS));

        let query = query_builder.build_query_as::<ExpenseEntry>();
        let expense: Option<ExpenseEntry> = query
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to update expense {}", expense_id))?;
        expense.map(|e| e.into()).ok_or(ExpenseNotFound(expense_id))
    }

    #[instrument(skip(self))]
    async fn delete_expense(&self, expense_id: i32) -> Result<(), ExpenseRepoError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete expense {}", expense_id))?;
        if result.rows_affected() == 0 {
            Err(ExpenseNotFound(expense_id))
        } else {
            Ok(())
        }
    }
}
