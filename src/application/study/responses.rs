use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::study::{Material, RecentMaterial, Subject, Summary};

#[derive(Debug, Clone)]
pub struct SubjectResponse {
  pub subject_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Subject> for SubjectResponse {
  fn from(subject: Subject) -> Self {
    Self {
      subject_id: subject.id,
      name: subject.name.into_inner(),
      description: subject.description,
      created_at: subject.created_at,
    }
  }
}

#[derive(Debug, Clone)]
pub struct MaterialResponse {
  pub material_id: Uuid,
  pub subject_id: Uuid,
  pub original_name: String,
  pub content_type: String,
  pub size_bytes: u64,
  /// e.g. "1.5 MB"
  pub size_formatted: String,
  pub uploaded_at: DateTime<Utc>,
}

impl From<Material> for MaterialResponse {
  fn from(material: Material) -> Self {
    Self {
      material_id: material.id,
      subject_id: material.subject_id,
      size_bytes: material.size.bytes(),
      size_formatted: material.size.human_readable(),
      original_name: material.original_name,
      content_type: material.content_type,
      uploaded_at: material.uploaded_at,
    }
  }
}

#[derive(Debug, Clone)]
pub struct RecentMaterialResponse {
  pub material: MaterialResponse,
  pub subject_name: Option<String>,
}

impl From<RecentMaterial> for RecentMaterialResponse {
  fn from(recent: RecentMaterial) -> Self {
    Self {
      material: recent.material.into(),
      subject_name: recent.subject_name,
    }
  }
}

#[derive(Debug, Clone)]
pub struct SummaryResponse {
  pub summary_id: Uuid,
  pub subject_id: Uuid,
  pub material_id: Option<Uuid>,
  pub title: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Summary> for SummaryResponse {
  fn from(summary: Summary) -> Self {
    Self {
      summary_id: summary.id,
      subject_id: summary.subject_id,
      material_id: summary.material_id,
      title: summary.title.into_inner(),
      content: summary.content.into_inner(),
      created_at: summary.created_at,
      updated_at: summary.updated_at,
    }
  }
}
