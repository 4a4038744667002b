use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use super::value_objects::{FileSize, SubjectName, SummaryContent, SummaryTitle};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Width of the `content_type` column
const MAX_CONTENT_TYPE_CHARS: usize = 255;

/// Longer extensions are dropped from the storage name
const MAX_EXTENSION_CHARS: usize = 16;

/// A course the student organises material under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: SubjectName,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Subject {
  pub fn new(user_id: Uuid, name: SubjectName, description: Option<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      name,
      description,
      created_at: Utc::now(),
    }
  }

  pub fn rename(&mut self, name: SubjectName, description: Option<String>) {
    self.name = name;
    self.description = description;
  }
}

/// An uploaded file attached to a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
  pub id: Uuid,
  pub user_id: Uuid,
  pub subject_id: Uuid,
  /// File name as uploaded by the client
  pub original_name: String,
  /// `{uuid}.{ext}` name inside the storage directory
  pub storage_name: String,
  pub content_type: String,
  pub size: FileSize,
  pub uploaded_at: DateTime<Utc>,
}

impl Material {
  pub fn new(
    user_id: Uuid,
    subject_id: Uuid,
    original_name: &str,
    content_type: Option<String>,
    size: FileSize,
  ) -> Self {
    let id = Uuid::new_v4();
    let original_name = sanitize_file_name(original_name);
    let storage_name = match extension_of(&original_name) {
      Some(ext) => format!("{}.{}", id, ext),
      None => id.to_string(),
    };

    Self {
      id,
      user_id,
      subject_id,
      original_name,
      storage_name,
      content_type: content_type
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && c.chars().count() <= MAX_CONTENT_TYPE_CHARS)
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
      size,
      uploaded_at: Utc::now(),
    }
  }
}

/// Keeps only the final path component of a client supplied name
fn sanitize_file_name(raw: &str) -> String {
  let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default().trim();
  if name.is_empty() || name == "." || name == ".." {
    "arquivo".to_string()
  } else {
    name.to_string()
  }
}

fn extension_of(file_name: &str) -> Option<String> {
  Path::new(file_name)
    .extension()
    .and_then(|e| e.to_str())
    .filter(|e| {
      !e.is_empty()
        && e.len() <= MAX_EXTENSION_CHARS
        && e.chars().all(|c| c.is_ascii_alphanumeric())
    })
    .map(|e| e.to_ascii_lowercase())
}

/// A titled study text, written by hand or generated from a material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
  pub id: Uuid,
  pub user_id: Uuid,
  pub subject_id: Uuid,
  pub material_id: Option<Uuid>,
  pub title: SummaryTitle,
  pub content: SummaryContent,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Summary {
  pub fn new(
    user_id: Uuid,
    subject_id: Uuid,
    material_id: Option<Uuid>,
    title: SummaryTitle,
    content: SummaryContent,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      subject_id,
      material_id,
      title,
      content,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn edit(&mut self, title: SummaryTitle, content: SummaryContent) {
    self.title = title;
    self.content = content;
    self.updated_at = Utc::now();
  }
}

/// Read model: a material together with its subject's name
#[derive(Debug, Clone)]
pub struct RecentMaterial {
  pub material: Material,
  pub subject_name: Option<String>,
}

/// Read model for the subject detail page
#[derive(Debug, Clone)]
pub struct SubjectDetails {
  pub subject: Subject,
  pub summaries: Vec<Summary>,
  pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
  pub total_subjects: i64,
  pub total_summaries: i64,
  pub total_materials: i64,
}
