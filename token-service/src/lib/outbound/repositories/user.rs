use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::models::User;
use crate::domain::authentication::models::UserName;
use crate::domain::authentication::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id.as_str())
        .bind(user.name.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::transient("PostgresUserRepository::create", e))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::transient("PostgresUserRepository::find_by_id", e))?;

        let Some(r) = row else {
            return Ok(None);
        };

        let read = |e: sqlx::Error| AuthError::transient("PostgresUserRepository::find_by_id", e);

        Ok(Some(User {
            id: OwnerId::new(r.try_get::<String, _>("id").map_err(read)?)?,
            name: UserName::new(r.try_get::<String, _>("name").map_err(read)?)?,
            created_at: r.try_get::<DateTime<Utc>, _>("created_at").map_err(read)?,
        }))
    }
}
