//! Password hashing utilities

use bcrypt::{hash, verify};
use tracing::debug;

/// Lowest cost factor bcrypt accepts
pub const MIN_HASH_COST: u32 = 4;
/// Highest cost factor bcrypt accepts
pub const MAX_HASH_COST: u32 = 31;

/// Hash a password using bcrypt with an explicit cost factor
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a stored digest.
///
/// A digest that is not valid bcrypt counts as a mismatch.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match verify(password, digest) {
        Ok(matches) => matches,
        Err(e) => {
            debug!(error = %e, "Stored password digest is not valid bcrypt");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "securepassword123";
        let hashed = hash_password_with_cost(password, MIN_HASH_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrongpassword", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password_with_cost("pw", MIN_HASH_COST).unwrap();
        let second = hash_password_with_cost("pw", MIN_HASH_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("pw", &first));
        assert!(verify_password("pw", &second));
    }

    #[test]
    fn test_malformed_digest_is_a_mismatch() {
        assert!(!verify_password("pw", "not-a-bcrypt-digest"));
        assert!(!verify_password("pw", ""));
    }

    #[test]
    fn test_cost_outside_bcrypt_range_is_rejected() {
        assert!(hash_password_with_cost("pw", MIN_HASH_COST - 1).is_err());
        assert!(hash_password_with_cost("pw", MAX_HASH_COST + 1).is_err());
    }
}
