use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::{
  entities::ConfirmationToken, errors::AuthError, ports::ConfirmationTokenRepository,
  value_objects::TokenHash,
};
use crate::domain::errors::RepositoryError;

#[derive(Debug, FromRow)]
struct ConfirmationTokenRow {
  id: Uuid,
  user_id: Uuid,
  token_hash: String,
  created_at: DateTime<Utc>,
  expires_at: DateTime<Utc>,
  confirmed_at: Option<DateTime<Utc>>,
}

impl From<ConfirmationTokenRow> for ConfirmationToken {
  fn from(row: ConfirmationTokenRow) -> Self {
    ConfirmationToken {
      id: row.id,
      user_id: row.user_id,
      token_hash: row.token_hash,
      created_at: row.created_at,
      expires_at: row.expires_at,
      confirmed_at: row.confirmed_at,
    }
  }
}

/// Stores only SHA-256 hashes of confirmation secrets
pub struct PostgresConfirmationTokenRepository {
  pool: PgPool,
}

impl PostgresConfirmationTokenRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ConfirmationTokenRepository for PostgresConfirmationTokenRepository {
  async fn create(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError> {
    let row = sqlx::query_as::<_, ConfirmationTokenRow>(
      r#"
            INSERT INTO confirmation_tokens (id, user_id, token_hash, created_at, expires_at, confirmed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, token_hash, created_at, expires_at, confirmed_at
            "#,
    )
    .bind(token.id)
    .bind(token.user_id)
    .bind(&token.token_hash)
    .bind(token.created_at)
    .bind(token.expires_at)
    .bind(token.confirmed_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_hash(&self, hash: &TokenHash) -> Result<Option<ConfirmationToken>, AuthError> {
    let row = sqlx::query_as::<_, ConfirmationTokenRow>(
      r#"
            SELECT id, user_id, token_hash, created_at, expires_at, confirmed_at
            FROM confirmation_tokens
            WHERE token_hash = $1
            "#,
    )
    .bind(hash.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn update(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError> {
    let result = sqlx::query_as::<_, ConfirmationTokenRow>(
      r#"
            UPDATE confirmation_tokens
            SET confirmed_at = $2, expires_at = $3
            WHERE id = $1
            RETURNING id, user_id, token_hash, created_at, expires_at, confirmed_at
            "#,
    )
    .bind(token.id)
    .bind(token.confirmed_at)
    .bind(token.expires_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{ConfirmationSecret, User, UserRepository};
  use crate::infrastructure::persistence::postgres::PostgresUserRepository;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use chrono::Duration;

  const SECRET: &str = "q3JXUv0Ue0mP7yZt6bW1xk2lVb9oR8sTcQ4nA5dEf-_";

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_token_lifecycle() {
    let (pool, _container) = setup_test_db().await;
    let users = PostgresUserRepository::new(pool.clone());
    let repo = PostgresConfirmationTokenRepository::new(pool);

    let user = users
      .create(User::new("Ana".into(), "ana@example.com".into(), "hash".into()))
      .await
      .unwrap();

    let hash = ConfirmationSecret::from_string(SECRET).unwrap().hash();
    let token = ConfirmationToken::new(user.id, hash.as_str().to_string(), Duration::minutes(15));
    repo.create(token).await.unwrap();

    let mut found = repo.find_by_hash(&hash).await.unwrap().unwrap();
    assert_eq!(found.user_id, user.id);
    assert!(!found.is_confirmed());

    found.confirm(Utc::now());
    let updated = repo.update(found).await.unwrap();
    assert!(updated.is_confirmed());
  }
}
