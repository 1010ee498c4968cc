//! Database entities module

pub mod language;
pub mod role;
pub mod user;

pub use language::Entity as Language;
pub use role::Entity as Role;
pub use user::Entity as User;
