//! Credential hashing and bearer-token signing

pub mod jwt;
pub mod password;

pub use jwt::{create_access_token, JwtConfig, TokenClaims, TokenCodec, TokenError};
pub use password::{hash_password_with_cost, verify_password, MAX_HASH_COST, MIN_HASH_COST};
