//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error rendering, extractors
//! - `middleware`: bearer authentication and the admin gate
//! - `modules`: request handlers grouped by resource
//! - `router`: API router with the OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

use std::sync::Arc;

use crate::application::AccountService;
use crate::domain::AccountRepositoryInterface;

/// Account service shared by every handler
pub type SharedAccountService = Arc<AccountService<dyn AccountRepositoryInterface>>;

pub use router::{create_api_router, ApiDoc, ApiState};
