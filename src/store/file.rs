//! JSON record-file backend
//!
//! A single structured-text file holding an ordered array of account records
//! with the observed field names `usr`, `passwd` (hex digest), `name`, plus
//! an `admin` flag that defaults to false so files written by older tooling
//! still load.

use super::AccountStore;
use crate::account::Account;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk record shape
#[derive(Debug, Serialize, Deserialize)]
struct FileRecord {
    usr: String,
    passwd: String,
    name: String,
    #[serde(default)]
    admin: bool,
}

impl From<FileRecord> for Account {
    fn from(r: FileRecord) -> Self {
        Account {
            username: r.usr,
            password_digest: r.passwd,
            display_name: r.name,
            is_admin: r.admin,
        }
    }
}

impl From<&Account> for FileRecord {
    fn from(a: &Account) -> Self {
        FileRecord {
            usr: a.username.clone(),
            passwd: a.password_digest.clone(),
            name: a.display_name.clone(),
            admin: a.is_admin,
        }
    }
}

/// File-backed account store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given record file path
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Return the record file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse every record. A missing file reads as no records;
    /// an unreadable or malformed file is `StoreUnavailable`.
    fn load_records(&self) -> Result<Vec<FileRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::StoreUnavailable(format!("failed to read {:?}: {}", self.path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::StoreUnavailable(format!("malformed record file {:?}: {}", self.path, e))
        })
    }

    fn write_records(&self, records: &[FileRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::StoreUnavailable(format!("failed to create {:?}: {}", parent, e))
            })?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| Error::Internal(format!("failed to serialize records: {}", e)))?;

        std::fs::write(&self.path, content).map_err(|e| {
            Error::StoreUnavailable(format!("failed to write {:?}: {}", self.path, e))
        })
    }
}

#[async_trait]
impl AccountStore for FileStore {
    async fn initialize(&self) -> Result<()> {
        let records = self.load_records()?;
        if !records.is_empty() {
            debug!(path = ?self.path, count = records.len(), "Record file already seeded");
            return Ok(());
        }

        let seed = Account::seed_admin();
        self.write_records(&[FileRecord::from(&seed)])?;
        info!(path = ?self.path, "Record file absent or empty, seeded default admin");
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.load_records()?.into_iter().map(Account::from).collect())
    }

    async fn find_by_username(&self, name: &str) -> Result<Option<Account>> {
        // first match wins; usernames are never normalized on disk
        Ok(self
            .list_accounts()
            .await?
            .into_iter()
            .find(|a| a.matches_username(name)))
    }
}
