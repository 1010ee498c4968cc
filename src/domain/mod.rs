//! Domain layer: accounts, dictionary rows and the persistence contract

pub mod account;
pub mod error;

pub use account::{
    Account, AccountChanges, AccountRepositoryInterface, Language, NewAccount, Role, RoleKind,
};
pub use error::{DomainError, DomainResult};
