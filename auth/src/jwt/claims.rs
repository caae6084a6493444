use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Besides the registered time claims, the token names the refresh record it
/// was minted alongside and embeds the hash of that record's secret. This is
/// what binds an access token to exactly one refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Owner the credential pair belongs to
    #[serde(rename = "ownerId")]
    pub owner_id: String,

    /// Hash of the bound refresh secret
    #[serde(rename = "refreshHash")]
    pub refresh_hash: String,

    /// Identifier of the bound refresh record
    #[serde(rename = "refreshRecordId")]
    pub refresh_record_id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims issued now.
    ///
    /// `iat` and `nbf` are set to the current time, `exp` to now plus `lifetime`.
    pub fn new(
        owner_id: impl ToString,
        refresh_hash: impl ToString,
        refresh_record_id: impl ToString,
        lifetime: Duration,
    ) -> Self {
        Self::issued_at(
            Utc::now(),
            owner_id,
            refresh_hash,
            refresh_record_id,
            lifetime,
        )
    }

    /// Build claims issued at a given instant.
    pub fn issued_at(
        now: DateTime<Utc>,
        owner_id: impl ToString,
        refresh_hash: impl ToString,
        refresh_record_id: impl ToString,
        lifetime: Duration,
    ) -> Self {
        let issued = now.timestamp();

        Self {
            owner_id: owner_id.to_string(),
            refresh_hash: refresh_hash.to_string(),
            refresh_record_id: refresh_record_id.to_string(),
            iat: issued,
            nbf: issued,
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Check if token is not valid yet.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        self.nbf > current_timestamp
    }
}
