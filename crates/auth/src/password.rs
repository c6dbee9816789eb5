//! Argon2id password hashing and verification.
//!
//! Every hash gets a fresh random salt from [`OsRng`] and is stored in PHC
//! string format, so the algorithm, cost parameters and salt travel with the
//! hash. Verification reads the parameters back out of the stored string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::PasswordConfig;
use crate::error::AuthError;

/// Build a hasher with the configured cost.
fn hasher(config: &PasswordConfig) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(
        config.memory_kib,
        config.iterations,
        config.parallelism,
        None,
    )
    .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string. Hashing the same password twice
/// yields different strings.
pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(config)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Stored hashes may ask for at most this multiple of the configured cost.
pub const COST_CEILING_FACTOR: u32 = 4;

/// Check a plaintext password against a stored PHC hash.
///
/// Verification runs with the cost parameters embedded in the stored hash.
/// A stored value that is not a valid PHC string, or whose memory, passes
/// or lanes exceed [`COST_CEILING_FACTOR`] times `config`, never verifies.
pub fn verify_password(password: &str, hash: &str, config: &PasswordConfig) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is malformed");
        return false;
    };
    let Ok(params) = Params::try_from(&parsed) else {
        tracing::warn!("Stored password hash has invalid parameters");
        return false;
    };
    if !within_cost_ceiling(&params, config) {
        tracing::warn!(
            m_cost = params.m_cost(),
            t_cost = params.t_cost(),
            p_cost = params.p_cost(),
            "Stored password hash exceeds the cost ceiling"
        );
        return false;
    }
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn within_cost_ceiling(params: &Params, config: &PasswordConfig) -> bool {
    let ceiling = |configured: u32| configured.saturating_mul(COST_CEILING_FACTOR);
    params.m_cost() <= ceiling(config.memory_kib)
        && params.t_cost() <= ceiling(config.iterations)
        && params.p_cost() <= ceiling(config.parallelism)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PasswordConfig {
        PasswordConfig::insecure_fast()
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, &config()).expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password(password, &hash, &config()));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password", &config()).unwrap();
        assert!(!verify_password("wrong-password", &hash, &config()));
    }

    #[test]
    fn test_same_password_gets_distinct_hashes() {
        let a = hash_password("secret1", &config()).unwrap();
        let b = hash_password("secret1", &config()).unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret1", &a, &config()));
        assert!(verify_password("secret1", &b, &config()));
    }

    #[test]
    fn test_configured_cost_is_embedded() {
        let hash = hash_password("secret1", &config()).unwrap();
        assert!(hash.contains("m=8,t=1,p=1"), "unexpected params in {hash}");
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("secret1", "not-a-hash", &config()));
        assert!(!verify_password("secret1", "", &config()));
    }

    #[test]
    fn test_truncated_hash_fails_closed() {
        let hash = hash_password("secret1", &config()).unwrap();
        for end in 0..hash.len() {
            assert!(
                !verify_password("secret1", &hash[..end], &config()),
                "prefix of length {end} verified"
            );
        }
        assert!(verify_password("secret1", &hash, &config()));
    }

    #[test]
    fn test_excessive_stored_cost_is_rejected() {
        let hash = hash_password("secret1", &config()).unwrap();
        let inflated = hash.replace(",t=1,", ",t=2000000,");
        assert_ne!(inflated, hash);

        assert!(!verify_password("secret1", &inflated, &config()));
        assert!(!verify_password("wrong", &inflated, &config()));
    }

    #[test]
    fn test_cost_within_ceiling_still_verifies() {
        let hash = hash_password("secret1", &config()).unwrap();
        let stronger = PasswordConfig {
            memory_kib: 64,
            iterations: 3,
            parallelism: 1,
        };
        assert!(verify_password("secret1", &hash, &stronger));

        let raised = hash.replace(",t=1,", ",t=4,");
        assert!(within_cost_ceiling(
            &Params::try_from(&PasswordHash::new(&raised).unwrap()).unwrap(),
            &config()
        ));
        let too_high = hash.replace(",t=1,", ",t=5,");
        assert!(!within_cost_ceiling(
            &Params::try_from(&PasswordHash::new(&too_high).unwrap()).unwrap(),
            &config()
        ));
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let bad = PasswordConfig {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };
        assert!(matches!(
            hash_password("secret1", &bad),
            Err(AuthError::Hashing(_))
        ));
    }
}
