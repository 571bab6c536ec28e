//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::rand_core::OsRng;

use crate::error::SessionError;

/// Hash a password with Argon2id using OWASP-recommended parameters
/// (memory: 19 MiB, iterations: 2, parallelism: 1).
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, SessionError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| SessionError::Crypto(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| SessionError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// If `pepper` is provided it is prepended to the password before
/// verification — this must match the pepper used during hashing.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(SessionError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, SessionError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| SessionError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SessionError::Crypto(format!("verify error: {e}"))),
    }
}
