//! In-memory backend (for testing)

use super::AccountStore;
use crate::account::Account;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::RwLock;
use tracing::debug;

/// In-memory account store
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given accounts, skipping the
    /// seed step. Test fixtures use this to model a non-empty medium.
    #[must_use]
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

fn lock_poisoned<T>(e: std::sync::PoisonError<T>) -> Error {
    Error::Internal(format!("lock poisoned: {}", e))
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn initialize(&self) -> Result<()> {
        let mut accounts = self.accounts.write().map_err(lock_poisoned)?;
        if accounts.is_empty() {
            accounts.push(Account::seed_admin());
            debug!("Memory store empty, seeded default admin");
        }
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.read().map_err(lock_poisoned)?.clone())
    }

    async fn find_by_username(&self, name: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .map_err(lock_poisoned)?
            .iter()
            .find(|a| a.matches_username(name))
            .cloned())
    }
}
