use crate::user_repo::UserRepoError::UserNotFound;
use crate::user_repo::{NewUser, User, UserRepo, UserRepoError, UserUpdate};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    users: HashMap<i32, User>,
    next_id: i32,
}

pub struct MemUserRepo {
    state: RwLock<State>,
}

impl MemUserRepo {
    pub fn new() -> MemUserRepo {
        let state = State {
            users: HashMap::new(),
            next_id: 1,
        };
        MemUserRepo {
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
impl UserRepo for MemUserRepo {
    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError> {
        let read_guard = self.read_lock()?;

        let mut users: Vec<User> = read_guard.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .users
            .get(&user_id)
            .cloned()
            .ok_or(UserNotFound(user_id))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let user = User::new(id, new_user.name);
        write_guard.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update_user(&self, user_id: i32, update: UserUpdate) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;

        let Some(user) = write_guard.users.get_mut(&user_id) else {
            return Err(UserNotFound(user_id));
        };
        if let Some(Some(name)) = update.name {
            user.name = name;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.users.remove(&user_id).is_some() {
            Ok(())
        } else {
            Err(UserNotFound(user_id))
        }
    }
}
