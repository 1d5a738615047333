use crate::expense_repo::ExpenseRepoError::ExpenseNotFound;
use crate::expense_repo::{
    Expense, ExpenseRepo, ExpenseRepoError, ExpenseUpdate, Filter, NewExpense, PageOptions,
};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    expenses: HashMap<i32, Expense>,
    next_id: i32,
}

pub struct MemExpenseRepo {
    state: RwLock<State>,
}

impl MemExpenseRepo {
    pub fn new() -> MemExpenseRepo {
        let state = State {
            expenses: HashMap::new(),
            next_id: 1,
        };
        MemExpenseRepo {
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
impl ExpenseRepo for MemExpenseRepo {
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .expenses
            .get(&expense_id)
            .cloned()
            .ok_or(ExpenseNotFound(expense_id))
    }

    async fn get_all_expenses(
        &self,
        filter: Filter,
        page_options: PageOptions,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        let read_guard = self.read_lock()?;

        let mut expenses: Vec<Expense> = read_guard.expenses.values().cloned().collect();
        expenses.sort_by_key(|e| e.id);

        let mut expenses: Box<dyn Iterator<Item = Expense>> = Box::new(expenses.into_iter());
        if let Some(user_id) = filter.user_id {
            expenses = Box::new(expenses.filter(move |e| e.user_id == user_id));
        }
        if !filter.categories.is_empty() {
            let categories = filter.categories;
            expenses = Box::new(expenses.filter(move |e| {
                if let Some(category) = &e.category {
                    categories.contains(category)
                } else {
                    false
                }
            }));
        }
        if let Some(from) = filter.from {
            expenses = Box::new(expenses.filter(move |e| e.spent_at >= from));
        }
        if let Some(to) = filter.to {
            expenses = Box::new(expenses.filter(move |e| e.spent_at <= to));
        }

        if let Some(offset) = page_options.offset {
            expenses = Box::new(expenses.skip(offset.max(0) as usize));
        }
        if let Some(limit) = page_options.limit {
            expenses = Box::new(expenses.take(limit.max(0) as usize));
        }

        Ok(expenses.collect())
    }

    async fn create_new_expense(
        &self,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let expense = new_expense.to_expense(id);
        write_guard.expenses.insert(id, expense.clone());

        Ok(expense)
    }

    async fn update_expense(
        &self,
        expense_id: i32,
        update: ExpenseUpdate,
    ) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        let Some(expense) = write_guard.expenses.get_mut(&expense_id) else {
            return Err(ExpenseNotFound(expense_id));
        };
        update.apply_to(expense);
        Ok(expense.clone())
    }

    async fn delete_expense(&self, expense_id: i32) -> Result<(), ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.expenses.remove(&expense_id).is_some() {
            Ok(())
        } else {
            Err(ExpenseNotFound(expense_id))
        }
    }
}
