//! Account entity and password digesting

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Seed username inserted into an empty store
pub const SEED_USERNAME: &str = "admin";
/// Seed plaintext password (digested before storage, never stored as-is)
pub const SEED_PASSWORD: &str = "admin";
/// Seed display name
pub const SEED_DISPLAY_NAME: &str = "Default Admin";

/// A stored account record.
///
/// `username` is unique under case-folded comparison; `password_digest` is
/// always the sha256 hex digest of the plaintext, never the plaintext itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Case-insensitive unique identifier
    pub username: String,
    /// 64-char lowercase hex sha256 digest
    pub password_digest: String,
    /// Human-readable label, no uniqueness constraint
    pub display_name: String,
    /// Grants visibility into the full account list
    pub is_admin: bool,
}

impl Account {
    /// Build an account from a plaintext password, digesting it immediately
    pub fn new(
        username: impl Into<String>,
        password_plaintext: &str,
        display_name: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            username: username.into(),
            password_digest: digest_password(password_plaintext),
            display_name: display_name.into(),
            is_admin,
        }
    }

    /// The default administrator record seeded into an empty store
    #[must_use]
    pub fn seed_admin() -> Self {
        Self::new(SEED_USERNAME, SEED_PASSWORD, SEED_DISPLAY_NAME, true)
    }

    /// Case-folded username match
    #[must_use]
    pub fn matches_username(&self, name: &str) -> bool {
        self.username.to_lowercase() == name.to_lowercase()
    }
}

/// Digest a plaintext password: single-pass sha256, no salt, lowercase hex.
#[must_use]
pub fn digest_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    let hash = hasher.finalize();
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}
