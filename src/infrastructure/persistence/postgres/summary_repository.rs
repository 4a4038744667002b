use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::study::{StudyError, Summary, SummaryContent, SummaryRepository, SummaryTitle};

const SUMMARY_COLUMNS: &str =
  "id, user_id, subject_id, material_id, title, content, created_at, updated_at";

#[derive(Debug, FromRow)]
struct SummaryRow {
  id: Uuid,
  user_id: Uuid,
  subject_id: Uuid,
  material_id: Option<Uuid>,
  title: String,
  content: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for Summary {
  type Error = StudyError;

  fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
    Ok(Summary {
      id: row.id,
      user_id: row.user_id,
      subject_id: row.subject_id,
      material_id: row.material_id,
      title: SummaryTitle::new(row.title)?,
      content: SummaryContent::new(row.content)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct CountRow {
  count: i64,
}

pub struct PostgresSummaryRepository {
  pool: PgPool,
}

impl PostgresSummaryRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_many(&self, query: &str, ids: &[Uuid]) -> Result<Vec<Summary>, StudyError> {
    let mut q = sqlx::query_as::<_, SummaryRow>(query);
    for id in ids {
      q = q.bind(*id);
    }
    let rows = q.fetch_all(&self.pool).await?;
    rows.into_iter().map(Summary::try_from).collect()
  }
}

#[async_trait]
impl SummaryRepository for PostgresSummaryRepository {
  async fn create(&self, summary: Summary) -> Result<Summary, StudyError> {
    let query = format!(
      r#"
            INSERT INTO summaries ({SUMMARY_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SUMMARY_COLUMNS}
            "#
    );

    let row = sqlx::query_as::<_, SummaryRow>(&query)
      .bind(summary.id)
      .bind(summary.user_id)
      .bind(summary.subject_id)
      .bind(summary.material_id)
      .bind(summary.title.value())
      .bind(summary.content.value())
      .bind(summary.created_at)
      .bind(summary.updated_at)
      .fetch_one(&self.pool)
      .await?;

    row.try_into()
  }

  async fn update(&self, summary: Summary) -> Result<Summary, StudyError> {
    let query = format!(
      r#"
            UPDATE summaries
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            RETURNING {SUMMARY_COLUMNS}
            "#
    );

    let result = sqlx::query_as::<_, SummaryRow>(&query)
      .bind(summary.id)
      .bind(summary.title.value())
      .bind(summary.content.value())
      .bind(summary.updated_at)
      .fetch_one(&self.pool)
      .await;

    match result {
      Ok(row) => row.try_into(),
      Err(sqlx::Error::RowNotFound) => Err(StudyError::SummaryNotFound(summary.id)),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Summary>, StudyError> {
    let query = format!("SELECT {SUMMARY_COLUMNS} FROM summaries WHERE id = $1 AND user_id = $2");
    Ok(self.fetch_many(&query, &[id, user_id]).await?.into_iter().next())
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Summary>, StudyError> {
    let query = format!(
      "SELECT {SUMMARY_COLUMNS} FROM summaries WHERE user_id = $1 ORDER BY created_at DESC"
    );
    self.fetch_many(&query, &[user_id]).await
  }

  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Summary>, StudyError> {
    let query = format!(
      r#"
            SELECT {SUMMARY_COLUMNS} FROM summaries
            WHERE subject_id = $1 AND user_id = $2
            ORDER BY created_at DESC
            "#
    );
    self.fetch_many(&query, &[subject_id, user_id]).await
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    let result = sqlx::query("DELETE FROM summaries WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound.into());
    }
    Ok(())
  }

  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError> {
    let result = sqlx::query("DELETE FROM summaries WHERE subject_id = $1")
      .bind(subject_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected())
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    let row = sqlx::query_as::<_, CountRow>(
      "SELECT COUNT(*) AS count FROM summaries WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.count)
  }
}
