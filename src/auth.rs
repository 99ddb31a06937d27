//! Authenticator
//!
//! Decides whether a (username, password) pair identifies a known account.
//! Each call is independent and stateless aside from the store contents:
//! no lockout, no rate limiting, no session or token issuance.

use crate::account::{digest_password, Account};
use crate::error::Result;
use crate::store::AccountStore;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Why a login attempt was rejected.
///
/// The two reasons carry distinct user-visible messages, matching observed
/// behavior. Note this leaks username validity to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No account matches the submitted username
    UnknownUser,
    /// The account exists but the digest does not match
    WrongPassword,
}

impl RejectReason {
    /// Dialog title shown by the presentation layer
    #[must_use]
    pub fn title(&self) -> &'static str {
        "Invalid credentials"
    }

    /// Dialog body shown by the presentation layer
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownUser => "The provided username is invalid, please try again",
            Self::WrongPassword => "The provided password is incorrect, please try again",
        }
    }
}

/// Outcome of an authentication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// Credentials match; carries the authenticated account
    Accepted(Account),
    /// Credentials do not match
    Rejected(RejectReason),
}

impl AuthResult {
    /// True for `Accepted`
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Authenticates submitted credentials against an account store.
///
/// Holds an explicit store handle; all reads go through store methods.
pub struct Authenticator {
    store: Box<dyn AccountStore>,
}

impl Authenticator {
    /// Create an authenticator over the given store
    #[must_use]
    pub fn new(store: Box<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Access the underlying store (account listing, re-initialization)
    #[must_use]
    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }

    /// Check whether the supplied credentials are valid.
    ///
    /// The plaintext is digested immediately (single-pass sha256, no salt);
    /// the store never observes it. Store failures propagate as
    /// `StoreUnavailable`; rejections are ordinary `AuthResult` values.
    pub async fn authenticate(
        &self,
        username: &str,
        password_plaintext: &str,
    ) -> Result<AuthResult> {
        let digest = digest_password(password_plaintext);

        let Some(account) = self.store.find_by_username(username).await? else {
            warn!(username = %username, "Login attempt unsuccessful: invalid username");
            return Ok(AuthResult::Rejected(RejectReason::UnknownUser));
        };

        // Constant-time comparison of the hex digests
        let digests_match: bool = digest
            .as_bytes()
            .ct_eq(account.password_digest.as_bytes())
            .into();

        if !digests_match {
            warn!(username = %account.username, "Login attempt unsuccessful: invalid password");
            return Ok(AuthResult::Rejected(RejectReason::WrongPassword));
        }

        debug!(username = %account.username, is_admin = account.is_admin, "Login successful");
        Ok(AuthResult::Accepted(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn authenticator_with(accounts: Vec<Account>) -> Authenticator {
        Authenticator::new(Box::new(MemoryStore::with_accounts(accounts)))
    }

    #[tokio::test]
    async fn test_accepts_matching_credentials() {
        let alice = Account::new("alice", "pw1", "Alice", false);
        let auth = authenticator_with(vec![alice.clone()]);

        let result = auth.authenticate("alice", "pw1").await.unwrap();
        assert_eq!(result, AuthResult::Accepted(alice));
    }

    #[tokio::test]
    async fn test_accepts_case_varied_username() {
        let alice = Account::new("alice", "pw1", "Alice", false);
        let auth = authenticator_with(vec![alice.clone()]);

        for name in ["ALICE", "Alice", "aLiCe"] {
            let result = auth.authenticate(name, "pw1").await.unwrap();
            assert_eq!(result, AuthResult::Accepted(alice.clone()));
        }
    }

    #[tokio::test]
    async fn test_rejects_unknown_user() {
        let auth = authenticator_with(vec![Account::new("alice", "pw1", "Alice", false)]);

        let result = auth.authenticate("bob", "x").await.unwrap();
        assert_eq!(result, AuthResult::Rejected(RejectReason::UnknownUser));
    }

    #[tokio::test]
    async fn test_rejects_wrong_password() {
        let auth = authenticator_with(vec![Account::new("alice", "pw1", "Alice", false)]);

        let result = auth.authenticate("alice", "wrong").await.unwrap();
        assert_eq!(result, AuthResult::Rejected(RejectReason::WrongPassword));
        assert!(!result.is_accepted());
    }

    #[tokio::test]
    async fn test_password_comparison_is_case_sensitive() {
        let auth = authenticator_with(vec![Account::new("alice", "Secret", "Alice", false)]);

        let result = auth.authenticate("alice", "secret").await.unwrap();
        assert_eq!(result, AuthResult::Rejected(RejectReason::WrongPassword));
    }

    #[tokio::test]
    async fn test_first_match_wins_on_duplicate_usernames() {
        // uniqueness invariant violated on purpose
        let first = Account::new("dup", "one", "First", false);
        let second = Account::new("dup", "two", "Second", true);
        let auth = authenticator_with(vec![first.clone(), second]);

        let result = auth.authenticate("dup", "one").await.unwrap();
        assert_eq!(result, AuthResult::Accepted(first));

        // the shadowed record is ignored silently
        let result = auth.authenticate("DUP", "two").await.unwrap();
        assert_eq!(result, AuthResult::Rejected(RejectReason::WrongPassword));
    }

    #[test]
    fn test_reject_messages_are_distinct() {
        assert_eq!(RejectReason::UnknownUser.title(), "Invalid credentials");
        assert_ne!(
            RejectReason::UnknownUser.message(),
            RejectReason::WrongPassword.message()
        );
    }
}
