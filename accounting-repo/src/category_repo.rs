use crate::serde_util::some_if_present;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait CategoryRepo: Sync + Send {
    async fn get_all_categories(&self) -> Result<Vec<Category>, CategoryRepoError>;

    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError>;

    /// Callers are expected to pass an already trimmed name. Name uniqueness
    /// is enforced here, not by the caller.
    async fn create_category(&self, new_category: NewCategory)
        -> Result<Category, CategoryRepoError>;

    async fn update_category(
        &self,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError>;

    async fn delete_category(&self, category_id: i32) -> Result<(), CategoryRepoError>;
}

#[derive(Error, Debug)]
pub enum CategoryRepoError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),
    #[error("Category name already exists")]
    DuplicateName,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl Category {
    pub const fn new(id: i32, name: String) -> Category {
        Category { id, name }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewCategory {
    pub name: String,
}

/// Partial update. The outer Option tracks presence in the request, so an
/// explicit null is visible to the caller rather than folded into "omitted".
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct CategoryUpdate {
    #[serde(default, deserialize_with = "some_if_present")]
    pub name: Option<Option<String>>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
