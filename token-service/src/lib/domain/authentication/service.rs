use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::CredentialError;
use auth::CredentialManager;
use auth::TokenValidation;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::CreateUserCommand;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::models::RefreshRecordId;
use crate::domain::authentication::models::TokenPair;
use crate::domain::authentication::models::User;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::RefreshTokenRepository;
use crate::domain::authentication::ports::UserRepository;

/// Domain service implementation for sign-in and refresh-token rotation.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no per-request state; the only shared mutable state lives behind
/// the refresh token repository.
pub struct AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    user_repository: Arc<UR>,
    token_repository: Arc<TR>,
    credentials: Arc<CredentialManager>,
    operation_timeout: Duration,
}

impl<UR, TR> AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User lookup implementation
    /// * `token_repository` - Refresh record persistence implementation
    /// * `credentials` - Credential manager (signing secret, lifetime, hashing cost)
    /// * `operation_timeout` - Deadline applied to each public operation
    pub fn new(
        user_repository: Arc<UR>,
        token_repository: Arc<TR>,
        credentials: Arc<CredentialManager>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            credentials,
            operation_timeout,
        }
    }

    /// Run `future` under the operation deadline.
    ///
    /// On expiry the future is dropped, aborting whatever step it was in.
    async fn within_deadline<T, F>(&self, operation: &'static str, future: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>> + Send,
        T: Send,
    {
        match tokio::time::timeout(self.operation_timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout = ?self.operation_timeout,
                    "Operation deadline exceeded"
                );
                Err(AuthError::transient(
                    operation,
                    format!("deadline of {:?} exceeded", self.operation_timeout),
                ))
            }
        }
    }

    /// Issue a new pair for `owner_id` and persist its refresh record.
    ///
    /// If signing fails after the insert, the record stays behind unreferenced.
    /// It can never be redeemed without an access token naming it.
    async fn mint(&self, owner_id: &OwnerId) -> Result<TokenPair, AuthError> {
        let credentials = Arc::clone(&self.credentials);
        let (refresh_token, hashed_token) = tokio::task::spawn_blocking(move || {
            let raw = credentials.mint_refresh_secret()?;
            let hashed = credentials.hash_refresh_secret(&raw)?;
            Ok::<_, CredentialError>((raw, hashed))
        })
        .await
        .map_err(|e| AuthError::transient("AuthService::mint - spawn_blocking", e))?
        .map_err(|e| AuthError::transient("AuthService::mint - refresh secret", e))?;

        let record_id = self
            .token_repository
            .insert(&hashed_token, owner_id)
            .await?;

        let access_token = self
            .credentials
            .mint_access_token(&hashed_token, owner_id.as_str(), &record_id.to_string())
            .map_err(|e| {
                tracing::error!(
                    owner_id = %owner_id,
                    record_id = %record_id,
                    error = %e,
                    "Access token signing failed after refresh record insert"
                );
                AuthError::transient("AuthService::mint - mint_access_token", e)
            })?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Compare the presented secret with the hash embedded in `claims`.
    async fn check_binding(
        &self,
        claims: &AccessClaims,
        refresh_token: &str,
    ) -> Result<bool, AuthError> {
        let credentials = Arc::clone(&self.credentials);
        let claims = claims.clone();
        let presented = refresh_token.to_string();

        tokio::task::spawn_blocking(move || credentials.check_binding(&claims, &presented))
            .await
            .map_err(|e| AuthError::transient("AuthService::check_binding - spawn_blocking", e))
    }

    /// Sign-in body: the owner must be a registered user.
    async fn issue(&self, owner_id: &OwnerId) -> Result<TokenPair, AuthError> {
        self.user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(owner_id.to_string()))?;

        let tokens = self.mint(owner_id).await?;

        tracing::info!(owner_id = %owner_id, "Credential pair issued");
        Ok(tokens)
    }

    /// Refresh body: validate, check binding, consume the record, mint anew.
    async fn rotate(&self, refresh_token: &str, access_token: &str) -> Result<TokenPair, AuthError> {
        let claims = match self.credentials.validate_access_token(access_token) {
            TokenValidation::Valid(claims) | TokenValidation::Expired(claims) => claims,
            TokenValidation::Invalid(e) => {
                tracing::warn!(error = %e, "Refresh rejected: untrusted access token");
                return Err(AuthError::InvalidAccessToken);
            }
        };

        if !self.check_binding(&claims, refresh_token).await? {
            tracing::warn!(
                owner_id = %claims.owner_id,
                record_id = %claims.refresh_record_id,
                "Refresh rejected: refresh token does not match access token"
            );
            return Err(AuthError::TokenMismatch);
        }

        let record_id = RefreshRecordId::from_string(&claims.refresh_record_id)
            .map_err(|_| AuthError::InvalidAccessToken)?;
        let owner_id = OwnerId::new(claims.owner_id).map_err(|_| AuthError::InvalidAccessToken)?;

        // Rotation boundary: only one caller can consume the record.
        if let Err(e) = self.token_repository.delete(&record_id).await {
            if matches!(e, AuthError::RefreshTokenNotRegistered) {
                tracing::warn!(
                    owner_id = %owner_id,
                    record_id = %record_id,
                    "Refresh rejected: refresh token already redeemed or unknown"
                );
            }
            return Err(e);
        }

        let tokens = self.mint(&owner_id).await?;

        tracing::info!(
            owner_id = %owner_id,
            consumed_record_id = %record_id,
            "Refresh token rotated"
        );
        Ok(tokens)
    }
}

#[async_trait]
impl<UR, TR> AuthServicePort for AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn sign_in(&self, owner_id: &OwnerId) -> Result<TokenPair, AuthError> {
        self.within_deadline("AuthService::sign_in", self.issue(owner_id))
            .await
    }

    async fn refresh(
        &self,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<TokenPair, AuthError> {
        self.within_deadline(
            "AuthService::refresh",
            self.rotate(refresh_token, access_token),
        )
        .await
    }

    async fn authorize(&self, access_token: &str) -> Result<OwnerId, AuthError> {
        match self.credentials.validate_access_token(access_token) {
            TokenValidation::Valid(claims) => {
                OwnerId::new(claims.owner_id).map_err(|_| AuthError::InvalidAccessToken)
            }
            TokenValidation::Expired(_) => Err(AuthError::AccessTokenExpired),
            TokenValidation::Invalid(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                Err(AuthError::InvalidAccessToken)
            }
        }
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, AuthError> {
        let user = User {
            id: OwnerId::generate(),
            name: command.name,
            created_at: Utc::now(),
        };

        let created_user = self.user_repository.create(user).await?;
        tracing::info!(owner_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, owner_id: &OwnerId) -> Result<User, AuthError> {
        self.user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(owner_id.to_string()))
    }
}
