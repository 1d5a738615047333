use crate::serde_util::some_if_present;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Predicates applied to the expense list. All of them are optional and
/// combine conjunctively.
#[derive(Clone, Default, Debug)]
pub struct Filter {
    pub user_id: Option<i32>,
    pub categories: Vec<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Filter {
    pub const NONE: Filter = Filter {
        user_id: None,
        categories: Vec::new(),
        from: None,
        to: None,
    };
}

/// Limit and offset apply independently; either may be present on its own.
#[derive(Clone, Copy, Default, Debug)]
pub struct PageOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageOptions {
    pub const NONE: PageOptions = PageOptions {
        limit: None,
        offset: None,
    };
}

#[async_trait]
pub trait ExpenseRepo: Sync + Send {
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError>;

    /// Matching expenses, always ordered by ascending id so that paging
    /// through the result set is reproducible.
    async fn get_all_expenses(
        &self,
        filter: Filter,
        page_options: PageOptions,
    ) -> Result<Vec<Expense>, ExpenseRepoError>;

    async fn create_new_expense(
        &self,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError>;

    async fn update_expense(
        &self,
        expense_id: i32,
        update: ExpenseUpdate,
    ) -> Result<Expense, ExpenseRepoError>;

    async fn delete_expense(&self, expense_id: i32) -> Result<(), ExpenseRepoError>;
}

#[derive(Error, Debug)]
pub enum ExpenseRepoError {
    #[error("Expense with id {0} not found")]
    ExpenseNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    pub user_id: i32,
    pub spent_at: NaiveDate,
    pub title: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl Expense {
    pub const fn new(
        id: i32,
        user_id: i32,
        spent_at: NaiveDate,
        title: String,
        amount: Decimal,
        category: Option<String>,
        note: Option<String>,
    ) -> Expense {
        Expense {
            id,
            user_id,
            spent_at,
            title,
            amount,
            category,
            note,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: i32,
    pub spent_at: NaiveDate,
    pub title: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl NewExpense {
    pub fn to_expense(&self, id: i32) -> Expense {
        Expense::new(
            id,
            self.user_id,
            self.spent_at,
            self.title.clone(),
            self.amount,
            self.category.clone(),
            self.note.clone(),
        )
    }
}

/// Partial update. `user_id` is deliberately not updatable. For the nullable
/// fields the outer Option tracks presence in the request and the inner one
/// the value, so an explicit null clears the stored value while an omitted
/// field leaves it untouched.
#[derive(Deserialize, Clone, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub spent_at: Option<NaiveDate>,
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub note: Option<Option<String>>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.spent_at.is_none()
            && self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.note.is_none()
    }

    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(spent_at) = self.spent_at {
            expense.spent_at = spent_at;
        }
        if let Some(title) = &self.title {
            expense.title = title.clone();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = &self.category {
            expense.category = category.clone();
        }
        if let Some(note) = &self.note {
            expense.note = note.clone();
        }
    }
}
