//! Session key-value store.
//!
//! The auth token and user id live outside the engine; anything
//! that needs them goes through [`SessionStore`] instead of a global.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

pub mod session_keys {
    pub const TOKEN: &str = "token";
    pub const USER_ID: &str = "user_id";
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn remove(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.write().await.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) -> Option<String> {
        self.values.write().await.remove(key)
    }
}

/// The signed-in user's id, if the session holds a numeric one.
pub async fn user_id(store: &dyn SessionStore) -> Option<i64> {
    store
        .get(session_keys::USER_ID)
        .await
        .and_then(|v| v.trim().parse().ok())
}
