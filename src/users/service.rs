//! User lookup service.
//!
//! Thin layer over a [`UserStore`] that turns absence into a typed
//! [`UserError::NotFound`]. No caching, no retries.

use std::sync::Arc;

use thiserror::Error;

use crate::users::model::{NewUser, User};
use crate::users::store::{StoreError, UserStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid id: {0}")]
    NotFound(i64),

    #[error("User id {0} already exists")]
    Conflict(i64),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(id) => UserError::Conflict(id),
            StoreError::Unavailable(reason) => UserError::Store(reason),
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, UserError> {
        tracing::info!(user_id = id, "Fetching user by id");
        self.store
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn get_all(&self) -> Result<Vec<User>, UserError> {
        tracing::info!("Fetching all users");
        Ok(self.store.find_all().await?)
    }

    pub async fn create(&self, user: NewUser) -> Result<User, UserError> {
        tracing::info!(requested_id = ?user.id, "Creating user");
        let stored = self.store.save(user).await?;
        tracing::debug!(user_id = stored.id, "User created");
        Ok(stored)
    }
}
