use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::hashing::HashingCost;
use crate::hashing::HashingError;
use crate::hashing::SecretHasher;
use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Number of random bytes in a refresh secret (256 bits).
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Construction-time settings of a [`CredentialManager`].
#[derive(Debug, Clone)]
pub struct CredentialSettings {
    /// Symmetric key used to sign access tokens
    pub signing_secret: String,
    /// Lifetime of an access token
    pub access_token_lifetime: Duration,
    /// Cost of refresh secret hashing
    pub hashing_cost: HashingCost,
}

/// Outcome of validating a presented access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    /// Signature, structure and time window are all acceptable.
    Valid(AccessClaims),
    /// Signature and structure are acceptable but the token is outside its
    /// time window (past `exp`, or before `nbf`). Claims are still returned.
    Expired(AccessClaims),
    /// The token cannot be trusted; no claims are extracted.
    Invalid(JwtError),
}

/// Credential manager errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    #[error("Invalid credential settings: {0}")]
    InvalidSettings(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Hashing error: {0}")]
    Hashing(#[from] HashingError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

/// Mints and checks credential pairs.
///
/// Holds only immutable configuration, so a single instance can be shared
/// across concurrent requests without locking.
pub struct CredentialManager {
    hasher: SecretHasher,
    jwt_handler: JwtHandler,
    access_token_lifetime: Duration,
}

impl CredentialManager {
    /// Create a credential manager.
    ///
    /// # Errors
    /// * `InvalidSettings` - Empty signing secret
    /// * `Hashing` - Hashing cost rejected
    pub fn new(settings: &CredentialSettings) -> Result<Self, CredentialError> {
        if settings.signing_secret.is_empty() {
            return Err(CredentialError::InvalidSettings(
                "signing secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            hasher: SecretHasher::new(settings.hashing_cost)?,
            jwt_handler: JwtHandler::new(settings.signing_secret.as_bytes()),
            access_token_lifetime: settings.access_token_lifetime,
        })
    }

    /// Generate a raw refresh secret.
    ///
    /// # Returns
    /// 32 bytes from the operating system CSPRNG, hex encoded (64 characters)
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source failed
    pub fn mint_refresh_secret(&self) -> Result<String, CredentialError> {
        let mut bytes = [0u8; REFRESH_SECRET_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CredentialError::EntropyUnavailable(e.to_string()))?;

        Ok(hex::encode(bytes))
    }

    /// Hash a raw refresh secret for storage and embedding.
    pub fn hash_refresh_secret(&self, raw_secret: &str) -> Result<String, CredentialError> {
        Ok(self.hasher.hash(raw_secret)?)
    }

    /// Sign an access token bound to a refresh record.
    ///
    /// # Arguments
    /// * `refresh_hash` - Hash of the refresh secret minted alongside
    /// * `owner_id` - Owner of the pair
    /// * `refresh_record_id` - Identifier of the stored refresh record
    ///
    /// # Errors
    /// * `Jwt` - Signing failed
    pub fn mint_access_token(
        &self,
        refresh_hash: &str,
        owner_id: &str,
        refresh_record_id: &str,
    ) -> Result<String, CredentialError> {
        let claims = AccessClaims::new(
            owner_id,
            refresh_hash,
            refresh_record_id,
            self.access_token_lifetime,
        );

        Ok(self.jwt_handler.encode(&claims)?)
    }

    /// Validate a presented access token.
    ///
    /// Claims are only extracted once the signature has been verified.
    pub fn validate_access_token(&self, token: &str) -> TokenValidation {
        let claims: AccessClaims = match self.jwt_handler.decode(token) {
            Ok(claims) => claims,
            Err(e) => return TokenValidation::Invalid(e),
        };

        let now = Utc::now().timestamp();
        if claims.is_expired(now) || claims.is_premature(now) {
            TokenValidation::Expired(claims)
        } else {
            TokenValidation::Valid(claims)
        }
    }

    /// Check that a presented raw refresh secret is the one bound to `claims`.
    pub fn check_binding(&self, claims: &AccessClaims, presented_secret: &str) -> bool {
        self.hasher.compare(&claims.refresh_hash, presented_secret)
    }
}
