//! Password hashing
//!
//! bcrypt with the library's default cost. Hashes are salted, so hashing the
//! same password twice yields two different strings that both verify.

use thiserror::Error;
use tracing::debug;

pub use bcrypt::DEFAULT_COST;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash `password` with [`DEFAULT_COST`].
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash `password` with an explicit bcrypt cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored hash.
///
/// A malformed hash is reported as a mismatch.
pub fn verify_password(hashed: &str, password: &str) -> bool {
    match bcrypt::verify(password, hashed) {
        Ok(valid) => valid,
        Err(e) => {
            debug!(error = %e, "Password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "mySecret123!";
        let hash = hash_password(password).unwrap();
        assert!(!hash.is_empty());

        assert!(verify_password(&hash, password));
        assert!(!verify_password(&hash, "wrongPassword"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "samePassword";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);

        assert!(verify_password(&first, password));
        assert!(verify_password(&second, password));
        assert!(!verify_password(&first, "otherPassword"));
        assert!(!verify_password(&second, "otherPassword"));
    }

    #[test]
    fn test_default_cost_in_hash() {
        let hash = hash_password("pw").unwrap();
        assert!(hash.starts_with(&format!("$2b${:02}$", DEFAULT_COST)));
    }

    #[test]
    fn test_malformed_hash_is_not_verified() {
        assert!(!verify_password("", "anything"));
        assert!(!verify_password("not-a-bcrypt-hash", "anything"));
        assert!(!verify_password("$2b$04$tooshort", "anything"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let err = hash_password_with_cost("pw", 2).unwrap_err();
        assert!(matches!(err, PasswordError::Hash(_)));
        assert!(err.to_string().starts_with("password hashing failed"));
    }

    #[test]
    fn test_low_cost_round_trip() {
        let hash = hash_password_with_cost("quick", 4).unwrap();
        assert!(verify_password(&hash, "quick"));
    }
}
