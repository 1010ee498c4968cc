//! Account aggregate
//!
//! Contains the Account entity, its dictionary references, DTOs, and the
//! repository interface.

pub mod model;
pub mod repository;
pub mod role;

mod dto;

pub use dto::{AccountChanges, NewAccount};
pub use model::{Account, Language, Role};
pub use repository::AccountRepositoryInterface;
pub use role::RoleKind;
