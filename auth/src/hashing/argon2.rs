use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use serde::Deserialize;

use super::errors::HashingError;

/// Argon2id cost parameters.
///
/// The defaults are the argon2 crate's recommended parameters. `minimal()`
/// exists for tests and must not be used in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HashingCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashingCost {
    /// Smallest cost argon2 accepts.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// One-way hashing of refresh secrets.
///
/// Every call to `hash` draws a fresh salt, so two hashes of the same secret
/// differ and can only be checked through `compare`.
#[derive(Clone)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl SecretHasher {
    /// Create a hasher with the given cost.
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters rejected by argon2 (e.g. memory below 8 KiB per lane)
    pub fn new(cost: HashingCost) -> Result<Self, HashingError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| HashingError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a secret.
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or hashing failed
    pub fn hash(&self, secret: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::HashingFailed(e.to_string()))
    }

    /// Check a candidate secret against a stored hash.
    ///
    /// The digest comparison is constant time. A hash that cannot be parsed
    /// yields `false`, same as a wrong secret.
    pub fn compare(&self, hashed: &str, candidate: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hashed) else {
            return false;
        };

        self.argon2
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
