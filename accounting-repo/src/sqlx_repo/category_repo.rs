use crate::category_repo::CategoryRepoError::{CategoryNotFound, DuplicateName};
use crate::category_repo::{
    Category, CategoryRepo, CategoryRepoError, CategoryUpdate, NewCategory,
};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct CategoryEntry {
    id: i32,
    name: String,
}

impl From<CategoryEntry> for Category {
    fn from(value: CategoryEntry) -> Self {
        Category::new(value.id, value.name)
    }
}

pub struct SQLxCategoryRepo {
    pool: PgPool,
}

impl SQLxCategoryRepo {
    pub fn new(pool: PgPool) -> SQLxCategoryRepo {
        SQLxCategoryRepo { pool }
    }
}

/// The unique constraint on the name column is the authority on duplicates;
/// violations are surfaced as a distinct error instead of a generic failure.
fn classify_error(e: sqlx::Error, context: String) -> CategoryRepoError {
    if let sqlx::Error::Database(db_error) = &e {
        if db_error.is_unique_violation() {
            return DuplicateName;
        }
    }
    CategoryRepoError::Other(anyhow::Error::new(e).context(context))
}

#[async_trait]
impl CategoryRepo for SQLxCategoryRepo {
    #[instrument(skip(self))]
    async fn get_all_categories(&self) -> Result<Vec<Category>, CategoryRepoError> {
        let categories: Vec<CategoryEntry> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get categories")?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        let category: Option<CategoryEntry> =
            sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get category {}", category_id))?;
        category.map(|c| c.into()).ok_or(CategoryNotFound(category_id))
    }

    #[instrument(skip(self, new_category))]
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO categories(name) VALUES ($1) RETURNING id")
                .bind(&new_category.name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify_error(e, "Unable to insert category".to_string()))?;
        Ok(Category::new(id, new_category.name))
    }

    #[instrument(skip(self, update))]
    async fn update_category(
        &self,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError> {
        let Some(Some(name)) = update.name else {
            return self.get_category(category_id).await;
        };

        let category: Option<CategoryEntry> =
            sqlx::query_as("UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name")
                .bind(name)
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    classify_error(e, format!("Unable to update category {}", category_id))
                })?;
        category.map(|c| c.into()).ok_or(CategoryNotFound(category_id))
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, category_id: i32) -> Result<(), CategoryRepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete category {}", category_id))?;
        if result.rows_affected() == 0 {
            Err(CategoryNotFound(category_id))
        } else {
            Ok(())
        }
    }
}
