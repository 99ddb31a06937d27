//! Credgate — credential store and authenticator for the desktop
//! account manager.
//!
//! The presentation layer collects a username/password pair, this crate
//! validates it against a small set of stored accounts, and the caller
//! switches screens on the outcome:
//! - [`AuthResult::Accepted`] carries the authenticated [`Account`]
//! - [`AuthResult::Rejected`] carries a [`RejectReason`] with the dialog
//!   title and message to show
//! - [`Error::StoreUnavailable`] means the backing medium is unreachable
//!   and authentication must not proceed
//!
//! Two backing-medium shapes (a JSON record file and a SQLite table) sit
//! behind the [`AccountStore`] trait; [`open_store`] picks one from
//! configuration. An empty store is seeded with a default administrator
//! (`admin` / `admin`) on [`AccountStore::initialize`], so the store is
//! never empty.

#![forbid(unsafe_code)]

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use account::{digest_password, Account};
pub use auth::{AuthResult, Authenticator, RejectReason};
pub use config::{load_config, AppConfig, StoreConfig};
pub use error::{Error, Result};
pub use session::{LoginState, Session};
pub use store::{open_store, AccountStore, StoreBackend};
