use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::CreateUserCommand;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::models::RefreshRecord;
use crate::domain::authentication::models::RefreshRecordId;
use crate::domain::authentication::models::TokenPair;
use crate::domain::authentication::models::User;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Issue a fresh credential pair for an existing user.
    ///
    /// # Arguments
    /// * `owner_id` - Owner to sign in
    ///
    /// # Returns
    /// New access/refresh token pair
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this owner ID
    /// * `Transient` - Storage, entropy or signing failure, or deadline exceeded
    async fn sign_in(&self, owner_id: &OwnerId) -> Result<TokenPair, AuthError>;

    /// Redeem a refresh token together with its paired access token.
    ///
    /// The access token may be expired. The refresh token is consumed and a
    /// new pair is issued for the same owner.
    ///
    /// # Arguments
    /// * `refresh_token` - Raw refresh secret
    /// * `access_token` - Access token minted alongside it
    ///
    /// # Returns
    /// New access/refresh token pair
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Malformed or badly signed access token
    /// * `TokenMismatch` - Refresh token is not the one bound to the access token
    /// * `RefreshTokenNotRegistered` - Refresh token already redeemed or unknown
    /// * `Transient` - Storage, entropy or signing failure, or deadline exceeded
    async fn refresh(&self, refresh_token: &str, access_token: &str)
        -> Result<TokenPair, AuthError>;

    /// Resolve the owner of a presented access token.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Malformed or badly signed access token
    /// * `AccessTokenExpired` - Access token is outside its validity window
    async fn authorize(&self, access_token: &str) -> Result<OwnerId, AuthError>;

    /// Register a new user under a freshly generated owner ID.
    ///
    /// # Errors
    /// * `Transient` - Storage failure
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, AuthError>;

    /// Retrieve user by owner ID.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Transient` - Storage failure
    async fn get_user(&self, owner_id: &OwnerId) -> Result<User, AuthError>;
}

/// Persistence operations for refresh records.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh record.
    ///
    /// # Arguments
    /// * `hashed_token` - Hash of the raw refresh secret
    /// * `owner_id` - Owner of the record
    ///
    /// # Returns
    /// Identifier of the created record
    ///
    /// # Errors
    /// * `Transient` - Storage unavailable
    async fn insert(
        &self,
        hashed_token: &str,
        owner_id: &OwnerId,
    ) -> Result<RefreshRecordId, AuthError>;

    /// Retrieve a refresh record by its stored token hash.
    ///
    /// # Errors
    /// * `RefreshTokenNotRegistered` - No record holds this hash
    /// * `Transient` - Storage unavailable
    async fn find_by_token(&self, hashed_token: &str) -> Result<RefreshRecord, AuthError>;

    /// Remove a refresh record.
    ///
    /// Of several concurrent calls for the same ID, exactly one succeeds.
    ///
    /// # Errors
    /// * `RefreshTokenNotRegistered` - Record already deleted or never existed
    /// * `Transient` - Storage unavailable
    async fn delete(&self, id: &RefreshRecordId) -> Result<(), AuthError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `Transient` - Storage unavailable
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by owner ID.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Transient` - Storage unavailable
    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<User>, AuthError>;
}
