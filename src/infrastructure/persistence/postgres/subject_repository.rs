use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::study::{StudyError, Subject, SubjectName, SubjectRepository};

#[derive(Debug, FromRow)]
struct SubjectRow {
  id: Uuid,
  user_id: Uuid,
  name: String,
  description: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<SubjectRow> for Subject {
  type Error = StudyError;

  fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
    Ok(Subject {
      id: row.id,
      user_id: row.user_id,
      name: SubjectName::new(row.name)?,
      description: row.description,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct CountRow {
  count: i64,
}

pub struct PostgresSubjectRepository {
  pool: PgPool,
}

impl PostgresSubjectRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SubjectRepository for PostgresSubjectRepository {
  async fn create(&self, subject: Subject) -> Result<Subject, StudyError> {
    let row = sqlx::query_as::<_, SubjectRow>(
      r#"
            INSERT INTO subjects (id, user_id, name, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, description, created_at
            "#,
    )
    .bind(subject.id)
    .bind(subject.user_id)
    .bind(subject.name.value())
    .bind(&subject.description)
    .bind(subject.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, subject: Subject) -> Result<Subject, StudyError> {
    let result = sqlx::query_as::<_, SubjectRow>(
      r#"
            UPDATE subjects
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, user_id, name, description, created_at
            "#,
    )
    .bind(subject.id)
    .bind(subject.name.value())
    .bind(&subject.description)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => row.try_into(),
      Err(sqlx::Error::RowNotFound) => Err(StudyError::SubjectNotFound(subject.id)),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Subject>, StudyError> {
    let row = sqlx::query_as::<_, SubjectRow>(
      r#"
            SELECT id, user_id, name, description, created_at
            FROM subjects
            WHERE id = $1 AND user_id = $2
            "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Subject::try_from).transpose()
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Subject>, StudyError> {
    let rows = sqlx::query_as::<_, SubjectRow>(
      r#"
            SELECT id, user_id, name, description, created_at
            FROM subjects
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Subject::try_from).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound.into());
    }
    Ok(())
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    let row = sqlx::query_as::<_, CountRow>(
      "SELECT COUNT(*) AS count FROM subjects WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.count)
  }
}
