use crate::serde_util::some_if_present;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError>;

    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError>;

    async fn update_user(&self, user_id: i32, update: UserUpdate) -> Result<User, UserRepoError>;

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError>;
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User with id {0} not found")]
    UserNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl User {
    pub const fn new(id: i32, name: String) -> User {
        User { id, name }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewUser {
    pub name: String,
}

/// Partial update. An absent field leaves the stored value untouched. The
/// outer Option tracks presence in the request, so an explicit null is
/// visible to the caller rather than folded into "omitted".
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "some_if_present")]
    pub name: Option<Option<String>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
