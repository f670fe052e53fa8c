//! In-memory stores for single-process runs and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use pwdless_core::error::AppError;
use pwdless_core::result::AppResult;
use pwdless_entity::account::Account;
use pwdless_entity::token::RefreshToken;

use super::store::{AccountStore, RefreshTokenStore};

/// Accounts held in a map keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<i32, Account>>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Removes an account, returning it if present.
    pub async fn remove(&self, id: i32) -> Option<Account> {
        self.accounts.write().await.remove(&id)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn update_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()> {
        match self.accounts.write().await.get_mut(&id) {
            Some(account) => {
                account.last_login = at;
                Ok(())
            }
            None => Err(AppError::not_found(format!("account {id} not found"))),
        }
    }
}

#[derive(Debug, Default)]
struct RecordState {
    next_id: i32,
    records: HashMap<i32, RefreshToken>,
}

/// Refresh records held in a map keyed by id.
///
/// Every operation runs under one mutex, so rotate and delete on the same
/// record are linearizable.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenStore {
    state: Arc<Mutex<RecordState>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record with the given id.
    pub async fn get(&self, id: i32) -> Option<RefreshToken> {
        self.state.lock().await.records.get(&id).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Returns `true` if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.records.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn lookup(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self
            .state
            .lock()
            .await
            .records
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn rotate(
        &self,
        record: &RefreshToken,
        previous: Option<&str>,
    ) -> AppResult<RefreshToken> {
        let mut state = self.state.lock().await;

        if state.records.values().any(|r| r.token == record.token && r.id != record.id) {
            return Err(AppError::conflict("refresh token already in use"));
        }

        if record.is_new() {
            state.next_id += 1;
            let mut inserted = record.clone();
            inserted.id = state.next_id;
            state.records.insert(inserted.id, inserted.clone());
            return Ok(inserted);
        }

        let stored = state
            .records
            .get_mut(&record.id)
            .filter(|stored| previous.is_none_or(|prev| stored.token == prev))
            .ok_or_else(|| {
                AppError::conflict("refresh token was rotated or deleted concurrently")
            })?;

        stored.token = record.token.clone();
        stored.expiry = record.expiry;
        stored.updated_at = record.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, record: &RefreshToken) -> AppResult<bool> {
        Ok(self.state.lock().await.records.remove(&record.id).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.records.len();
        state.records.retain(|_, r| r.expiry >= now);
        Ok((before - state.records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use pwdless_core::error::ErrorKind;

    use super::*;

    fn record(token: &str, expiry: DateTime<Utc>) -> RefreshToken {
        RefreshToken::new(1, token.to_string(), expiry, false, None)
    }

    #[tokio::test]
    async fn test_rotate_inserts_then_updates() {
        let store = MemoryRefreshTokenStore::new();
        let inserted = store
            .rotate(&record("first", Utc::now() + Duration::hours(1)), None)
            .await
            .unwrap();
        assert_eq!(inserted.id, 1);

        let mut next = inserted.clone();
        next.token = "second".to_string();
        let rotated = store.rotate(&next, Some("first")).await.unwrap();
        assert_eq!(rotated.id, inserted.id);

        assert!(store.lookup("first").await.unwrap().is_none());
        assert_eq!(store.lookup("second").await.unwrap().unwrap().id, inserted.id);
    }

    #[tokio::test]
    async fn test_rotate_with_stale_previous_conflicts() {
        let store = MemoryRefreshTokenStore::new();
        let inserted = store
            .rotate(&record("first", Utc::now() + Duration::hours(1)), None)
            .await
            .unwrap();

        let mut a = inserted.clone();
        a.token = "a".to_string();
        store.rotate(&a, Some("first")).await.unwrap();

        let mut b = inserted.clone();
        b.token = "b".to_string();
        let err = store.rotate(&b, Some("first")).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_rotate_after_delete_conflicts() {
        let store = MemoryRefreshTokenStore::new();
        let inserted = store
            .rotate(&record("first", Utc::now() + Duration::hours(1)), None)
            .await
            .unwrap();

        assert!(store.delete(&inserted).await.unwrap());
        assert!(!store.delete(&inserted).await.unwrap());

        let mut next = inserted.clone();
        next.token = "second".to_string();
        assert!(store.rotate(&next, Some("first")).await.unwrap_err().is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryRefreshTokenStore::new();
        let now = Utc::now();
        store.rotate(&record("old", now - Duration::minutes(1)), None).await.unwrap();
        store.rotate(&record("live", now + Duration::minutes(1)), None).await.unwrap();

        assert_eq!(store.purge_expired(now).await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
        assert!(store.lookup("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_account_lookup_and_last_login() {
        let store = MemoryAccountStore::new();
        let now = Utc::now();
        store
            .insert(Account {
                id: 1,
                created_at: now,
                updated_at: now,
                last_login: now - Duration::days(1),
                email: "user@boot.io".to_string(),
                name: "User".to_string(),
                active: true,
                roles: vec![],
            })
            .await;

        assert!(store.find_by_email("user@boot.io").await.unwrap().is_some());
        assert!(store.find_by_email("nobody@boot.io").await.unwrap().is_none());

        store.update_last_login(1, now).await.unwrap();
        assert_eq!(store.find_by_id(1).await.unwrap().unwrap().last_login, now);

        store.remove(1).await;
        assert!(store.update_last_login(1, now).await.is_err());
    }
}
