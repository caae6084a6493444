use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::models::RefreshRecord;
use crate::domain::authentication::models::RefreshRecordId;
use crate::domain::authentication::ports::RefreshTokenRepository;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn insert(&self, hashed_token: &str, owner_id: &OwnerId) -> Result<RefreshRecordId, AuthError> {
        let id = RefreshRecordId::new();

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, token_hash, owner_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.0)
        .bind(hashed_token)
        .bind(owner_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::transient("PostgresRefreshTokenRepository::insert", e))?;

        Ok(id)
    }

    async fn find_by_token(&self, hashed_token: &str) -> Result<RefreshRecord, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, token_hash, owner_id
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(hashed_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::transient("PostgresRefreshTokenRepository::find_by_token", e))?
        .ok_or(AuthError::RefreshTokenNotRegistered)?;

        let read = |e: sqlx::Error| AuthError::transient("PostgresRefreshTokenRepository::find_by_token", e);

        Ok(RefreshRecord {
            id: RefreshRecordId(row.try_get::<Uuid, _>("id").map_err(read)?),
            hashed_token: row.try_get("token_hash").map_err(read)?,
            owner_id: OwnerId::new(row.try_get::<String, _>("owner_id").map_err(read)?)?,
        })
    }

    async fn delete(&self, id: &RefreshRecordId) -> Result<(), AuthError> {
        // A single statement: concurrent deletes of one id serialize on the row lock,
        // and only the first one sees a row to remove.
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::transient("PostgresRefreshTokenRepository::delete", e))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::RefreshTokenNotRegistered);
        }

        Ok(())
    }
}
