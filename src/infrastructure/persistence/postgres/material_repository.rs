use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::study::{
  FileSize, Material, MaterialRepository, PageRequest, RecentMaterial, StudyError,
};

#[derive(Debug, FromRow)]
struct MaterialRow {
  id: Uuid,
  user_id: Uuid,
  subject_id: Uuid,
  original_name: String,
  storage_name: String,
  content_type: String,
  size_bytes: i64,
  uploaded_at: DateTime<Utc>,
}

impl From<MaterialRow> for Material {
  fn from(row: MaterialRow) -> Self {
    Material {
      id: row.id,
      user_id: row.user_id,
      subject_id: row.subject_id,
      original_name: row.original_name,
      storage_name: row.storage_name,
      content_type: row.content_type,
      size: FileSize::new(row.size_bytes.max(0) as u64),
      uploaded_at: row.uploaded_at,
    }
  }
}

/// Material joined with its subject name
#[derive(Debug, FromRow)]
struct RecentMaterialRow {
  #[sqlx(flatten)]
  material: MaterialRow,
  subject_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct CountRow {
  count: i64,
}

pub struct PostgresMaterialRepository {
  pool: PgPool,
}

impl PostgresMaterialRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl MaterialRepository for PostgresMaterialRepository {
  async fn create(&self, material: Material) -> Result<Material, StudyError> {
    let row = sqlx::query_as::<_, MaterialRow>(
      r#"
            INSERT INTO materials (
                id, user_id, subject_id, original_name, storage_name,
                content_type, size_bytes, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, subject_id, original_name, storage_name,
                      content_type, size_bytes, uploaded_at
            "#,
    )
    .bind(material.id)
    .bind(material.user_id)
    .bind(material.subject_id)
    .bind(&material.original_name)
    .bind(&material.storage_name)
    .bind(&material.content_type)
    .bind(material.size.bytes() as i64)
    .bind(material.uploaded_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Material>, StudyError> {
    let row = sqlx::query_as::<_, MaterialRow>(
      r#"
            SELECT id, user_id, subject_id, original_name, storage_name,
                   content_type, size_bytes, uploaded_at
            FROM materials
            WHERE id = $1 AND user_id = $2
            "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Material>, StudyError> {
    let rows = sqlx::query_as::<_, MaterialRow>(
      r#"
            SELECT id, user_id, subject_id, original_name, storage_name,
                   content_type, size_bytes, uploaded_at
            FROM materials
            WHERE subject_id = $1 AND user_id = $2
            ORDER BY uploaded_at DESC
            "#,
    )
    .bind(subject_id)
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_page_by_subject(
    &self,
    subject_id: Uuid,
    page: PageRequest,
  ) -> Result<Vec<Material>, StudyError> {
    let rows = sqlx::query_as::<_, MaterialRow>(
      r#"
            SELECT id, user_id, subject_id, original_name, storage_name,
                   content_type, size_bytes, uploaded_at
            FROM materials
            WHERE subject_id = $1
            ORDER BY uploaded_at DESC
            LIMIT $2 OFFSET $3
            "#,
    )
    .bind(subject_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_recent_by_user(
    &self,
    user_id: Uuid,
    limit: i64,
  ) -> Result<Vec<RecentMaterial>, StudyError> {
    let rows = sqlx::query_as::<_, RecentMaterialRow>(
      r#"
            SELECT m.id, m.user_id, m.subject_id, m.original_name, m.storage_name,
                   m.content_type, m.size_bytes, m.uploaded_at,
                   s.name AS subject_name
            FROM materials m
            LEFT JOIN subjects s ON s.id = m.subject_id
            WHERE m.user_id = $1
            ORDER BY m.uploaded_at DESC
            LIMIT $2
            "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| RecentMaterial {
          material: row.material.into(),
          subject_name: row.subject_name,
        })
        .collect(),
    )
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    let result = sqlx::query("DELETE FROM materials WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound.into());
    }
    Ok(())
  }

  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError> {
    let result = sqlx::query("DELETE FROM materials WHERE subject_id = $1")
      .bind(subject_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected())
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    let row = sqlx::query_as::<_, CountRow>(
      "SELECT COUNT(*) AS count FROM materials WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.count)
  }
}
