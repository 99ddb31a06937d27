//! Credential Store - durable home for the account collection
//!
//! Two observed backing-medium shapes (a JSON record file and a relational
//! table) are unified behind one storage-capability trait so the
//! authenticator stays agnostic to the medium. An in-memory backend exists
//! for tests. Whatever the backend, the store guarantees it is never empty:
//! `initialize` seeds a default administrator into an empty medium and is
//! a no-op afterwards.

mod file;
mod memory;
mod sqlite;


pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::account::Account;
use crate::config::StoreConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Storage capability shared by every backing medium
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug {
    /// Open or create the backing medium and seed the default admin record
    /// iff the store holds no accounts. Idempotent: a second call against a
    /// non-empty store performs no mutation.
    async fn initialize(&self) -> Result<()>;

    /// All accounts in storage order
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Case-insensitive exact match on username.
    ///
    /// First stored match wins if the uniqueness invariant is ever violated;
    /// duplicates are ignored silently.
    async fn find_by_username(&self, name: &str) -> Result<Option<Account>>;
}

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// JSON record file
    #[default]
    File,
    /// SQLite table via sqlx
    Sqlite,
    /// In-memory only (for testing)
    Memory,
}

/// Open the store selected by configuration.
///
/// The sqlite backend connects eagerly here; an unreachable database surfaces
/// as `StoreUnavailable` before any authentication can be attempted.
pub async fn open_store(config: &StoreConfig) -> Result<Box<dyn AccountStore>> {
    match config.backend {
        StoreBackend::File => Ok(Box::new(FileStore::new(config.file_path()))),
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&config.sqlite_url).await?;
            Ok(Box::new(store))
        }
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}
