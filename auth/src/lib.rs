//! Credential primitives library
//!
//! Provides the building blocks of the access/refresh credential protocol:
//! - Refresh secret hashing (Argon2id, constant-time compare)
//! - Signed access tokens (HS512 JWT) bound to a refresh record
//! - Credential management (minting, validation, binding checks)
//!
//! Persistence and user lookup are left to the consuming service.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::{HashingCost, SecretHasher};
//!
//! let hasher = SecretHasher::new(HashingCost::minimal()).unwrap();
//! let hash = hasher.hash("raw-secret").unwrap();
//! assert!(hasher.compare(&hash, "raw-secret"));
//! assert!(!hasher.compare(&hash, "other-secret"));
//! ```
//!
//! ## Minting and Validating a Pair
//! ```
//! use auth::{CredentialManager, CredentialSettings, HashingCost, TokenValidation};
//!
//! let manager = CredentialManager::new(&CredentialSettings {
//!     signing_secret: "secret_key_at_least_64_bytes_long_for_hs512_signing_in_tests!!".to_string(),
//!     access_token_lifetime: chrono::Duration::minutes(60),
//!     hashing_cost: HashingCost::minimal(),
//! })
//! .unwrap();
//!
//! let raw = manager.mint_refresh_secret().unwrap();
//! let hashed = manager.hash_refresh_secret(&raw).unwrap();
//! let access = manager.mint_access_token(&hashed, "u1", "record-1").unwrap();
//!
//! match manager.validate_access_token(&access) {
//!     TokenValidation::Valid(claims) | TokenValidation::Expired(claims) => {
//!         assert!(manager.check_binding(&claims, &raw));
//!     }
//!     TokenValidation::Invalid(e) => panic!("rejected: {}", e),
//! }
//! ```

pub mod credentials;
pub mod hashing;
pub mod jwt;

// Re-export commonly used items
pub use credentials::CredentialError;
pub use credentials::CredentialManager;
pub use credentials::CredentialSettings;
pub use credentials::TokenValidation;
pub use hashing::HashingCost;
pub use hashing::HashingError;
pub use hashing::SecretHasher;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
