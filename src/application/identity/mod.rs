//! Identity module: authentication and account management
//!
//! - `principal`: bearer token to active account
//! - `access`: role-membership policy
//! - `service`: `AccountService` with login and every account mutation

pub mod access;
pub mod principal;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{require_administrator, require_role};
pub use principal::{resolve_principal, AuthError};
pub use service::{AccountPatch, AccountService, ExampleCredentials, LoginResult, PatchOutcome};
