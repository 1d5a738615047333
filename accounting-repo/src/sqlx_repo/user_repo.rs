use crate::user_repo::UserRepoError::UserNotFound;
use crate::user_repo::{NewUser, User, UserRepo, UserRepoError, UserUpdate};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct UserEntry {
    id: i32,
    name: String,
}

impl From<UserEntry> for User {
    fn from(value: UserEntry) -> Self {
        User::new(value.id, value.name)
    }
}

pub struct SQLxUserRepo {
    pool: PgPool,
}

impl SQLxUserRepo {
    pub fn new(pool: PgPool) -> SQLxUserRepo {
        SQLxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepo for SQLxUserRepo {
    #[instrument(skip(self))]
    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError> {
        let users: Vec<UserEntry> =
            sqlx::query_as("SELECT id, name FROM users ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get users")?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError> {
        let user: Option<UserEntry> =
            sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get user {}", user_id))?;
        user.map(|u| u.into()).ok_or(UserNotFound(user_id))
    }

    #[instrument(skip(self, new_user))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO users(name) VALUES ($1) RETURNING id")
            .bind(&new_user.name)
            .fetch_one(&self.pool)
            .await
            .context("Unable to insert user")?;
        Ok(User::new(id, new_user.name))
    }

    #[instrument(skip(self, update))]
    async fn update_user(&self, user_id: i32, update: UserUpdate) -> Result<User, UserRepoError> {
        let Some(Some(name)) = update.name else {
            // Nothing to apply, but the row must still exist.
            return self.get_user(user_id).await;
        };

        let user: Option<UserEntry> =
            sqlx::query_as("UPDATE users SET name = $1 WHERE id = $2 RETURNING id, name")
                .bind(name)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to update user {}", user_id))?;
        user.map(|u| u.into()).ok_or(UserNotFound(user_id))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete user {}", user_id))?;
        if result.rows_affected() == 0 {
            Err(UserNotFound(user_id))
        } else {
            Ok(())
        }
    }
}
