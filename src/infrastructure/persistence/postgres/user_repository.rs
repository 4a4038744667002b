use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{DailyUsage, UsageKind, User},
  errors::AuthError,
  ports::UserRepository,
  value_objects::Email,
};
use crate::domain::errors::RepositoryError;

const USER_COLUMNS: &str = r#"
    id,
    name,
    email,
    password_hash,
    is_enabled,
    summaries_today,
    last_summary_date,
    feedbacks_today,
    last_feedback_date,
    created_at,
    updated_at
"#;

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  is_enabled: bool,
  summaries_today: i32,
  last_summary_date: Option<NaiveDate>,
  feedbacks_today: i32,
  last_feedback_date: Option<NaiveDate>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      name: row.name,
      email: row.email,
      password_hash: row.password_hash,
      is_enabled: row.is_enabled,
      summary_usage: DailyUsage::new(row.summaries_today, row.last_summary_date),
      feedback_usage: DailyUsage::new(row.feedbacks_today, row.last_feedback_date),
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let query = format!(
      r#"
            INSERT INTO users (
                id, name, email, password_hash, is_enabled,
                summaries_today, last_summary_date, feedbacks_today, last_feedback_date,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
    );

    let row = sqlx::query_as::<_, UserRow>(&query)
      .bind(user.id)
      .bind(&user.name)
      .bind(&user.email)
      .bind(&user.password_hash)
      .bind(user.is_enabled)
      .bind(user.summary_usage.count)
      .bind(user.summary_usage.last_date)
      .bind(user.feedback_usage.count)
      .bind(user.feedback_usage.last_date)
      .bind(user.created_at)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    let row = sqlx::query_as::<_, UserRow>(&query)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

    let row = sqlx::query_as::<_, UserRow>(&query)
      .bind(email.as_str())
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let query = format!(
      r#"
            UPDATE users
            SET
                name = $2,
                password_hash = $3,
                is_enabled = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
    );

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(user.id)
      .bind(&user.name)
      .bind(&user.password_hash)
      .bind(user.is_enabled)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }

  async fn try_consume_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
    limit: u32,
  ) -> Result<bool, AuthError> {
    let (count, date) = usage_columns(kind);
    // Rollover and increment in one statement; the WHERE clause is the limit check
    let query = format!(
      r#"
            UPDATE users
            SET
                {count} = CASE WHEN {date} = $2 THEN {count} + 1 ELSE 1 END,
                {date} = $2,
                updated_at = NOW()
            WHERE id = $1
              AND $3 > 0
              AND ({date} IS DISTINCT FROM $2 OR {count} < $3)
            RETURNING id
            "#
    );

    let consumed = sqlx::query_scalar::<_, Uuid>(&query)
      .bind(user_id)
      .bind(today)
      .bind(i32::try_from(limit).unwrap_or(i32::MAX))
      .fetch_optional(&self.pool)
      .await?;

    if consumed.is_some() {
      return Ok(true);
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;
    if !exists {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }
    Ok(false)
  }

  async fn release_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
  ) -> Result<(), AuthError> {
    let (count, date) = usage_columns(kind);
    let query = format!(
      r#"
            UPDATE users
            SET {count} = {count} - 1, updated_at = NOW()
            WHERE id = $1 AND {date} = $2 AND {count} > 0
            "#
    );

    sqlx::query(&query)
      .bind(user_id)
      .bind(today)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}

/// Counter and date columns of a metered feature
fn usage_columns(kind: UsageKind) -> (&'static str, &'static str) {
  match kind {
    UsageKind::Summary => ("summaries_today", "last_summary_date"),
    UsageKind::Feedback => ("feedbacks_today", "last_feedback_date"),
  }
}
