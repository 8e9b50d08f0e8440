//! Password hashing and verification using Argon2id.
//!
//! Salt is randomly generated per hash. An optional pepper
//! (server-side secret) can be prepended before hashing; the same
//! pepper must then be supplied at verification time.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use taskhive_core::error::{TaskhiveError, TaskhiveResult};

fn peppered<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            buf.push_str(p);
            buf.push_str(password);
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a plaintext password into PHC format.
pub fn hash_password(password: &str, pepper: Option<&str>) -> TaskhiveResult<String> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| TaskhiveError::Crypto(format!("hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> TaskhiveResult<bool> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| TaskhiveError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(TaskhiveError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct-horse-battery", None).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery", &hash, None).unwrap());
        assert!(!verify_password("wrong-password", &hash, None).unwrap());
    }

    #[test]
    fn pepper_must_match() {
        let hash = hash_password("secret", Some("pepper-a")).unwrap();
        assert!(verify_password("secret", &hash, Some("pepper-a")).unwrap());
        assert!(!verify_password("secret", &hash, Some("pepper-b")).unwrap());
        assert!(!verify_password("secret", &hash, None).unwrap());
    }

    #[test]
    fn malformed_hash_is_a_crypto_error() {
        assert!(verify_password("secret", "not-a-phc-hash", None).is_err());
    }
}
