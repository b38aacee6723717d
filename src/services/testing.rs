//! In-memory collector for tests
//!
//! Behaves like the collector service for registration and collection
//! management, records every call, and can be told to fail.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use async_trait::async_trait;
use crate::models::{CheckUserRequest, CheckUserResponse, Collection, RegisterRequest, RegisterResponse};
use crate::state::AuthToken;
use crate::utils::errors::{CollectorError, CollectorResult};
use super::collector::CollectorApi;

/// A call received by the fake collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorCall {
    CheckUser(i64),
    RegisterUser(i64),
    List,
    Create(String),
    Rename { id: String, new_name: String },
    Delete(String),
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, String>,
    collections: HashMap<String, Vec<Collection>>,
    next_id: u64,
    calls: Vec<CollectorCall>,
    failing: bool,
}

/// Fake collector keeping users and collections in memory
#[derive(Debug, Default)]
pub struct RecordingCollector {
    inner: Mutex<Inner>,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a user with the given token
    pub fn with_user(self, user_id: i64, token: &str) -> Self {
        self.lock().users.insert(user_id, token.to_string());
        self
    }

    /// Pre-create a collection owned by the holder of `token`
    pub fn with_collection(self, token: &str, name: &str) -> Self {
        {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = inner.next_id.to_string();
            inner
                .collections
                .entry(token.to_string())
                .or_default()
                .push(Collection { id, name: name.to_string() });
        }
        self
    }

    /// Make every subsequent call fail with a 500
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn calls(&self) -> Vec<CollectorCall> {
        self.lock().calls.clone()
    }

    /// Calls that change collections
    pub fn mutations(&self) -> Vec<CollectorCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, CollectorCall::Create(_) | CollectorCall::Rename { .. } | CollectorCall::Delete(_)))
            .collect()
    }

    pub fn collection_names(&self, token: &str) -> Vec<String> {
        self.lock()
            .collections
            .get(token)
            .map(|list| list.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: CollectorCall) -> CollectorResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.failing {
            return Err(CollectorError::Status { status: 500, message: "collector is failing".to_string() });
        }
        Ok(inner)
    }
}

fn not_found() -> CollectorError {
    CollectorError::Status { status: 404, message: "collection not found".to_string() }
}

#[async_trait]
impl CollectorApi for RecordingCollector {
    async fn check_user(&self, request: &CheckUserRequest) -> CollectorResult<CheckUserResponse> {
        let inner = self.record(CollectorCall::CheckUser(request.telegram_id))?;
        Ok(match inner.users.get(&request.telegram_id) {
            Some(token) => CheckUserResponse { token: token.clone(), success: true },
            None => CheckUserResponse { token: String::new(), success: false },
        })
    }

    async fn register_user(&self, request: &RegisterRequest) -> CollectorResult<RegisterResponse> {
        let mut inner = self.record(CollectorCall::RegisterUser(request.telegram_id))?;
        let token = format!("token-{}", request.telegram_id);
        inner.users.insert(request.telegram_id, token.clone());
        Ok(RegisterResponse { token })
    }

    async fn list_collections(&self, token: &AuthToken) -> CollectorResult<Vec<Collection>> {
        let inner = self.record(CollectorCall::List)?;
        Ok(inner.collections.get(token.as_str()).cloned().unwrap_or_default())
    }

    async fn create_collection(&self, token: &AuthToken, name: &str) -> CollectorResult<Collection> {
        let mut inner = self.record(CollectorCall::Create(name.to_string()))?;
        inner.next_id += 1;
        let collection = Collection { id: inner.next_id.to_string(), name: name.to_string() };
        inner
            .collections
            .entry(token.as_str().to_string())
            .or_default()
            .push(collection.clone());
        Ok(collection)
    }

    async fn rename_collection(&self, token: &AuthToken, collection_id: &str, new_name: &str) -> CollectorResult<()> {
        let mut inner = self.record(CollectorCall::Rename {
            id: collection_id.to_string(),
            new_name: new_name.to_string(),
        })?;
        let collection = inner
            .collections
            .get_mut(token.as_str())
            .and_then(|list| list.iter_mut().find(|c| c.id == collection_id))
            .ok_or_else(not_found)?;
        collection.name = new_name.to_string();
        Ok(())
    }

    async fn delete_collection(&self, token: &AuthToken, collection_id: &str) -> CollectorResult<()> {
        let mut inner = self.record(CollectorCall::Delete(collection_id.to_string()))?;
        let list = inner.collections.get_mut(token.as_str()).ok_or_else(not_found)?;
        let before = list.len();
        list.retain(|c| c.id != collection_id);
        if list.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
