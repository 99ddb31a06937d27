//! Login session state machine
//!
//! Two states, `LoggedOut` and `LoggedIn(account)`. The only way in is an
//! `Accepted` authentication result; the only way out is an explicit logout.
//! No timeout-based transition exists.

use crate::account::Account;
use crate::auth::AuthResult;
use crate::error::Result;
use crate::store::AccountStore;
use tracing::info;

/// Current login state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    /// No authenticated account
    #[default]
    LoggedOut,
    /// An account is authenticated
    LoggedIn(Account),
}

/// Presentation-facing session wrapper around [`LoginState`]
#[derive(Debug, Default)]
pub struct Session {
    state: LoginState,
}

impl Session {
    /// Start logged out
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// The authenticated account, if any
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        match &self.state {
            LoginState::LoggedIn(account) => Some(account),
            LoginState::LoggedOut => None,
        }
    }

    /// Apply an authentication result. Transitions to `LoggedIn` only on
    /// `Accepted`; a rejection leaves the state untouched. Returns whether
    /// the session is now logged in.
    pub fn apply(&mut self, result: &AuthResult) -> bool {
        if let AuthResult::Accepted(account) = result {
            info!(username = %account.username, "Session logged in");
            self.state = LoginState::LoggedIn(account.clone());
        }
        matches!(self.state, LoginState::LoggedIn(_))
    }

    /// Explicit logout; the only transition back to `LoggedOut`
    pub fn logout(&mut self) {
        if let LoginState::LoggedIn(account) = &self.state {
            info!(username = %account.username, "Session logged out");
        }
        self.state = LoginState::LoggedOut;
    }

    /// Accounts the menu may list: admins see every account, everyone else
    /// sees only their own record, and a logged-out session sees nothing.
    pub async fn visible_accounts(&self, store: &dyn AccountStore) -> Result<Vec<Account>> {
        match &self.state {
            LoginState::LoggedOut => Ok(Vec::new()),
            LoginState::LoggedIn(account) if account.is_admin => store.list_accounts().await,
            LoginState::LoggedIn(account) => Ok(store
                .list_accounts()
                .await?
                .into_iter()
                .filter(|a| a.matches_username(&account.username))
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RejectReason;
    use crate::store::MemoryStore;

    #[test]
    fn test_rejection_does_not_transition() {
        let mut session = Session::new();
        assert!(!session.apply(&AuthResult::Rejected(RejectReason::WrongPassword)));
        assert_eq!(session.state(), &LoginState::LoggedOut);
    }

    #[test]
    fn test_accept_then_logout() {
        let account = Account::new("alice", "pw1", "Alice", false);
        let mut session = Session::new();

        assert!(session.apply(&AuthResult::Accepted(account.clone())));
        assert_eq!(session.current_account(), Some(&account));

        session.logout();
        assert_eq!(session.state(), &LoginState::LoggedOut);
        assert!(session.current_account().is_none());
    }

    #[test]
    fn test_rejection_does_not_log_out() {
        let account = Account::new("alice", "pw1", "Alice", false);
        let mut session = Session::new();
        session.apply(&AuthResult::Accepted(account.clone()));

        // a failed re-authentication leaves the session alone
        assert!(session.apply(&AuthResult::Rejected(RejectReason::UnknownUser)));
        assert_eq!(session.current_account(), Some(&account));
    }

    #[tokio::test]
    async fn test_admin_sees_all_accounts() {
        let store = MemoryStore::with_accounts(vec![
            Account::new("root", "r", "Root", true),
            Account::new("alice", "pw1", "Alice", false),
        ]);
        let mut session = Session::new();
        session.apply(&AuthResult::Accepted(Account::new("root", "r", "Root", true)));

        let visible = session.visible_accounts(&store).await.unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn test_non_admin_sees_only_own_record() {
        let store = MemoryStore::with_accounts(vec![
            Account::new("root", "r", "Root", true),
            Account::new("alice", "pw1", "Alice", false),
        ]);
        let mut session = Session::new();
        session.apply(&AuthResult::Accepted(Account::new(
            "alice", "pw1", "Alice", false,
        )));

        let visible = session.visible_accounts(&store).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].username, "alice");
    }

    #[tokio::test]
    async fn test_logged_out_sees_nothing() {
        let store = MemoryStore::with_accounts(vec![Account::new("root", "r", "Root", true)]);
        let session = Session::new();
        assert!(session.visible_accounts(&store).await.unwrap().is_empty());
    }
}
