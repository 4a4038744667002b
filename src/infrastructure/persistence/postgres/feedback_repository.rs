use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::feedback::{
  Feedback, FeedbackError, FeedbackKind, FeedbackRepository, NewFeedback, Rating,
};

#[derive(Debug, FromRow)]
struct FeedbackRow {
  id: i64,
  user_id: Option<Uuid>,
  kind: String,
  rating: Option<i16>,
  message: String,
  user_email: Option<String>,
  page: String,
  user_agent: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
  type Error = FeedbackError;

  fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
    let rating = row
      .rating
      .map(|r| Rating::new(u8::try_from(r).unwrap_or(0)))
      .transpose()?;

    Ok(Feedback {
      id: row.id,
      user_id: row.user_id,
      kind: row.kind.parse::<FeedbackKind>()?,
      rating,
      message: row.message,
      user_email: row.user_email,
      page: row.page,
      user_agent: row.user_agent,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresFeedbackRepository {
  pool: PgPool,
}

impl PostgresFeedbackRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
  async fn create(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackError> {
    let row = sqlx::query_as::<_, FeedbackRow>(
      r#"
            INSERT INTO feedbacks (user_id, kind, rating, message, user_email, page, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, kind, rating, message, user_email, page, user_agent, created_at
            "#,
    )
    .bind(feedback.user_id)
    .bind(feedback.kind.as_str())
    .bind(feedback.rating.map(|r| i16::from(r.value())))
    .bind(&feedback.message)
    .bind(&feedback.user_email)
    .bind(&feedback.page)
    .bind(&feedback.user_agent)
    .bind(feedback.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_support::{create_test_user, setup_test_db};

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_create_assigns_sequential_ids() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresFeedbackRepository::new(pool.clone());
    let user = create_test_user(&pool, "aluno@example.com").await;

    let new = NewFeedback {
      user_id: Some(user),
      kind: FeedbackKind::Suggestion,
      rating: Some(Rating::new(4).unwrap()),
      message: "Modo escuro, por favor".into(),
      user_email: None,
      page: "/resumos".into(),
      user_agent: "Mozilla/5.0".into(),
      created_at: Utc::now(),
    };

    let first = repo.create(new.clone()).await.unwrap();
    let second = repo.create(new).await.unwrap();

    assert_eq!(first.kind, FeedbackKind::Suggestion);
    assert_eq!(first.rating.map(|r| r.value()), Some(4));
    assert!(second.id > first.id);
  }
}
