//! # Auth Control API
//!
//! Authentication and user-management service: login issuing bearer tokens,
//! self-service language preference and admin-scoped account management.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Accounts, roles, languages, errors and the repository trait
//! - **application**: Principal resolution, role policy and account mutations
//! - **infrastructure**: Password hashing, token codec, SeaORM persistence and seeds
//! - **interfaces**: REST API (axum) with OpenAPI documentation
//! - **shared**: Process plumbing (graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
