use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::authentication::errors::OwnerIdError;
use crate::domain::authentication::errors::RefreshRecordIdError;
use crate::domain::authentication::errors::UserNameError;

/// Opaque identifier of the principal a credential pair belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    const MAX_LENGTH: usize = 128;

    /// Generate a fresh owner ID for a new user.
    ///
    /// # Returns
    /// OwnerId holding a random UUID v4 string
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an owner ID received from a caller.
    ///
    /// # Errors
    /// * `Empty` - Blank identifier
    /// * `TooLong` - Identifier longer than 128 characters
    pub fn new(id: impl Into<String>) -> Result<Self, OwnerIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(OwnerIdError::Empty)
        } else if id.len() > Self::MAX_LENGTH {
            Err(OwnerIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: id.len(),
            })
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Refresh record unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshRecordId(pub Uuid);

impl RefreshRecordId {
    /// Generate a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a record ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, RefreshRecordIdError> {
        Uuid::parse_str(s)
            .map(RefreshRecordId)
            .map_err(|e| RefreshRecordIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for RefreshRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefreshRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted binding of a hashed refresh secret to its owner.
///
/// Created on every mint, deleted once on redemption, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRecord {
    pub id: RefreshRecordId,
    pub hashed_token: String,
    pub owner_id: OwnerId,
}

/// Access/refresh credential pair handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Registered principal.
#[derive(Debug, Clone)]
pub struct User {
    pub id: OwnerId,
    pub name: UserName,
    pub created_at: DateTime<Utc>,
}

/// Display name of a user
///
/// Ensures the name is 1-64 characters without control characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid user name.
    ///
    /// # Errors
    /// * `Empty` - Blank name
    /// * `TooLong` - Name longer than 64 characters
    /// * `InvalidCharacters` - Contains control characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(UserNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else if name.chars().any(char::is_control) {
            Err(UserNameError::InvalidCharacters)
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: UserName,
}

impl CreateUserCommand {
    pub fn new(name: UserName) -> Self {
        Self { name }
    }
}
