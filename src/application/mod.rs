pub mod identity;

// Re-export key types for convenience
pub use identity::{
    require_administrator, require_role, resolve_principal, AccountPatch, AccountService,
    AuthError, ExampleCredentials, LoginResult, PatchOutcome,
};
