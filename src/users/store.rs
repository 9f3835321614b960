//! Entity store port and the in-memory adapter.
//!
//! # Responsibilities
//! - Look up users by id
//! - List all users
//! - Persist new users, assigning ids when the caller did not
//!
//! # Design Decisions
//! - The store is a trait so a database adapter can replace the in-memory one
//! - Absence is `Ok(None)`, not an error; the service layer decides what it means
//! - DashMap keeps concurrent lookups lock-sharded

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;

use crate::users::model::{NewUser, User};

/// Errors surfaced by a store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this id already exists.
    #[error("user {0} already exists")]
    Conflict(i64),

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_all(&self) -> StoreResult<Vec<User>>;

    async fn save(&self, user: NewUser) -> StoreResult<User>;
}

/// Process-local store. Iteration order is ascending id.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: DashMap<i64, User>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Build a store holding `seed`. Fails on the first duplicate id.
    pub fn with_users(seed: impl IntoIterator<Item = NewUser>) -> StoreResult<Self> {
        let store = Self::new();
        for user in seed {
            store.insert(user)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn insert(&self, user: NewUser) -> StoreResult<User> {
        match user.id {
            Some(id) => self.insert_at(id, user),
            // Generation stops at i64::MAX rather than wrapping to negative ids.
            None => loop {
                let id = self
                    .next_id
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1))
                    .map_err(|_| StoreError::Unavailable("user id space exhausted".to_string()))?;
                match self.users.entry(id) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(slot) => {
                        let stored = user.into_user(id);
                        slot.insert(stored.clone());
                        return Ok(stored);
                    }
                }
            },
        }
    }

    fn insert_at(&self, id: i64, user: NewUser) -> StoreResult<User> {
        match self.users.entry(id) {
            Entry::Occupied(_) => Err(StoreError::Conflict(id)),
            Entry::Vacant(slot) => {
                let stored = user.into_user(id);
                slot.insert(stored.clone());
                // Keep generated ids clear of explicit ones.
                self.next_id
                    .fetch_max(id.saturating_add(1), Ordering::Relaxed);
                Ok(stored)
            }
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        self.insert(user)
    }
}
