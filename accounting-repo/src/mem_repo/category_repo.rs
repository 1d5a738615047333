use crate::category_repo::CategoryRepoError::{CategoryNotFound, DuplicateName};
use crate::category_repo::{
    Category, CategoryRepo, CategoryRepoError, CategoryUpdate, NewCategory,
};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    categories: HashMap<i32, Category>,
    next_id: i32,
}

impl State {
    fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != exclude_id)
    }
}

pub struct MemCategoryRepo {
    state: RwLock<State>,
}

impl MemCategoryRepo {
    pub fn new() -> MemCategoryRepo {
        let state = State {
            categories: HashMap::new(),
            next_id: 1,
        };
        MemCategoryRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

#[async_trait]
impl CategoryRepo for MemCategoryRepo {
    async fn get_all_categories(&self) -> Result<Vec<Category>, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        let mut categories: Vec<Category> = read_guard.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .categories
            .get(&category_id)
            .cloned()
            .ok_or(CategoryNotFound(category_id))
    }

    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.name_taken(&new_category.name, None) {
            return Err(DuplicateName);
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let category = Category::new(id, new_category.name);
        write_guard.categories.insert(id, category.clone());

        Ok(category)
    }

    async fn update_category(
        &self,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.categories.contains_key(&category_id) {
            return Err(CategoryNotFound(category_id));
        }
        if let Some(Some(name)) = update.name {
            if write_guard.name_taken(&name, Some(category_id)) {
                return Err(DuplicateName);
            }
            let category = write_guard
                .categories
                .get_mut(&category_id)
                .ok_or(CategoryNotFound(category_id))?;
            category.name = name;
        }

        write_guard
            .categories
            .get(&category_id)
            .cloned()
            .ok_or(CategoryNotFound(category_id))
    }

    async fn delete_category(&self, category_id: i32) -> Result<(), CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.categories.remove(&category_id).is_some() {
            Ok(())
        } else {
            Err(CategoryNotFound(category_id))
        }
    }
}
