use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{DashboardStats, Material, RecentMaterial, Subject, SubjectDetails, Summary};
use super::errors::StudyError;
use super::ports::{
  FileStorage, MaterialRepository, StorageError, SubjectRepository, Summarizer, SummaryRepository,
  TextExtractor,
};
use super::value_objects::{
  FileSize, PageRequest, SubjectName, SummaryContent, SummaryTitle, normalize_description,
};
use crate::domain::auth::UsageKind;
use crate::domain::auth::ports::UserRepository;

const RECENT_MATERIALS_LIMIT: i64 = 5;

#[derive(Debug, Clone)]
pub struct StudyConfig {
  pub daily_summary_limit: u32,
  pub max_file_size_bytes: u64,
  /// Word budget handed to the summarizer
  pub summary_max_words: usize,
}

impl Default for StudyConfig {
  fn default() -> Self {
    Self {
      daily_summary_limit: 3,
      max_file_size_bytes: 20 * 1024 * 1024,
      summary_max_words: 300,
    }
  }
}

/// A file received from the client, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedFile {
  pub file_name: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

/// Input for automatic summary generation
#[derive(Debug, Clone)]
pub struct GenerateSummaryData {
  pub material_id: Uuid,
  pub subject_id: Uuid,
  pub title: Option<String>,
  /// Content typed by the user; when blank the material text is summarized
  pub content: Option<String>,
}

pub struct StudyService {
  subject_repo: Arc<dyn SubjectRepository>,
  material_repo: Arc<dyn MaterialRepository>,
  summary_repo: Arc<dyn SummaryRepository>,
  user_repo: Arc<dyn UserRepository>,
  storage: Arc<dyn FileStorage>,
  extractor: Arc<dyn TextExtractor>,
  summarizer: Arc<dyn Summarizer>,
  config: StudyConfig,
}

impl StudyService {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    subject_repo: Arc<dyn SubjectRepository>,
    material_repo: Arc<dyn MaterialRepository>,
    summary_repo: Arc<dyn SummaryRepository>,
    user_repo: Arc<dyn UserRepository>,
    storage: Arc<dyn FileStorage>,
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    config: StudyConfig,
  ) -> Self {
    Self {
      subject_repo,
      material_repo,
      summary_repo,
      user_repo,
      storage,
      extractor,
      summarizer,
      config,
    }
  }

  pub fn config(&self) -> &StudyConfig {
    &self.config
  }

  // Subject operations
  pub async fn create_subject(
    &self,
    user_id: Uuid,
    name: SubjectName,
    description: Option<String>,
  ) -> Result<Subject, StudyError> {
    let subject = Subject::new(user_id, name, normalize_description(description));
    let subject = self.subject_repo.create(subject).await?;

    tracing::info!(subject_id = %subject.id, user_id = %user_id, "Subject created");
    Ok(subject)
  }

  pub async fn list_subjects(&self, user_id: Uuid) -> Result<Vec<Subject>, StudyError> {
    self.subject_repo.find_by_user(user_id).await
  }

  pub async fn subject_details(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
    page: PageRequest,
  ) -> Result<SubjectDetails, StudyError> {
    let subject = self.owned_subject(user_id, subject_id).await?;
    let summaries = self
      .summary_repo
      .find_by_subject_and_user(subject_id, user_id)
      .await?;
    let materials = self
      .material_repo
      .find_page_by_subject(subject_id, page)
      .await?;

    Ok(SubjectDetails {
      subject,
      summaries,
      materials,
    })
  }

  pub async fn update_subject(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
    name: SubjectName,
    description: Option<String>,
  ) -> Result<Subject, StudyError> {
    let mut subject = self.owned_subject(user_id, subject_id).await?;
    subject.rename(name, normalize_description(description));
    self.subject_repo.update(subject).await
  }

  /// Removes the subject with its summaries and materials.
  /// Stored files are removed best-effort.
  pub async fn delete_subject(&self, user_id: Uuid, subject_id: Uuid) -> Result<(), StudyError> {
    self.owned_subject(user_id, subject_id).await?;

    let removed_summaries = self.summary_repo.delete_by_subject(subject_id).await?;

    let materials = self
      .material_repo
      .find_by_subject_and_user(subject_id, user_id)
      .await?;
    for material in &materials {
      self.remove_stored_file(material).await;
    }
    let removed_materials = self.material_repo.delete_by_subject(subject_id).await?;

    self.subject_repo.delete(subject_id).await?;

    tracing::info!(
      subject_id = %subject_id,
      summaries = removed_summaries,
      materials = removed_materials,
      "Subject deleted"
    );
    Ok(())
  }

  // Material operations
  pub async fn upload_material(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
    file: UploadedFile,
  ) -> Result<Material, StudyError> {
    self.owned_subject(user_id, subject_id).await?;

    if file.bytes.is_empty() {
      return Err(StudyError::EmptyFile);
    }
    let size = file.bytes.len() as u64;
    if size > self.config.max_file_size_bytes {
      return Err(StudyError::FileTooLarge {
        max_bytes: self.config.max_file_size_bytes,
      });
    }

    let material = Material::new(
      user_id,
      subject_id,
      &file.file_name,
      file.content_type,
      FileSize::new(size),
    );

    self
      .storage
      .store(&material.storage_name, &file.bytes)
      .await?;

    match self.material_repo.create(material.clone()).await {
      Ok(saved) => {
        tracing::info!(
          material_id = %saved.id,
          size = %saved.size,
          "Material uploaded"
        );
        Ok(saved)
      }
      Err(e) => {
        self.remove_stored_file(&material).await;
        Err(e)
      }
    }
  }

  pub async fn list_materials(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
  ) -> Result<Vec<Material>, StudyError> {
    self
      .material_repo
      .find_by_subject_and_user(subject_id, user_id)
      .await
  }

  pub async fn delete_material(&self, user_id: Uuid, material_id: Uuid) -> Result<(), StudyError> {
    let material = self.owned_material(user_id, material_id).await?;

    self.remove_stored_file(&material).await;
    self.material_repo.delete(material.id).await?;

    tracing::info!(material_id = %material_id, "Material deleted");
    Ok(())
  }

  /// Loads a material together with its stored bytes
  pub async fn load_material_file(
    &self,
    user_id: Uuid,
    material_id: Uuid,
  ) -> Result<(Material, Vec<u8>), StudyError> {
    let material = self.owned_material(user_id, material_id).await?;
    let bytes = self.read_stored_file(&material).await?;
    Ok((material, bytes))
  }

  pub async fn recent_materials(&self, user_id: Uuid) -> Result<Vec<RecentMaterial>, StudyError> {
    self
      .material_repo
      .find_recent_by_user(user_id, RECENT_MATERIALS_LIMIT)
      .await
  }

  // Summary operations
  pub async fn create_summary(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
    title: SummaryTitle,
    content: SummaryContent,
  ) -> Result<Summary, StudyError> {
    self.owned_subject(user_id, subject_id).await?;

    let summary = Summary::new(user_id, subject_id, None, title, content);
    self.summary_repo.create(summary).await
  }

  /// Newest first, optionally restricted to one subject
  pub async fn list_summaries(
    &self,
    user_id: Uuid,
    subject_id: Option<Uuid>,
  ) -> Result<Vec<Summary>, StudyError> {
    match subject_id {
      Some(subject_id) => {
        self
          .summary_repo
          .find_by_subject_and_user(subject_id, user_id)
          .await
      }
      None => self.summary_repo.find_by_user(user_id).await,
    }
  }

  pub async fn get_summary(&self, user_id: Uuid, summary_id: Uuid) -> Result<Summary, StudyError> {
    self
      .summary_repo
      .find_by_id_and_user(summary_id, user_id)
      .await?
      .ok_or(StudyError::SummaryNotFound(summary_id))
  }

  pub async fn update_summary(
    &self,
    user_id: Uuid,
    summary_id: Uuid,
    title: SummaryTitle,
    content: SummaryContent,
  ) -> Result<Summary, StudyError> {
    let mut summary = self.get_summary(user_id, summary_id).await?;
    summary.edit(title, content);
    self.summary_repo.update(summary).await
  }

  pub async fn delete_summary(&self, user_id: Uuid, summary_id: Uuid) -> Result<(), StudyError> {
    let summary = self.get_summary(user_id, summary_id).await?;
    self.summary_repo.delete(summary.id).await
  }

  /// Creates a summary for a material, metered by the daily quota.
  ///
  /// One use is taken from the quota before any work and given back when
  /// the summary could not be stored. A day rollover stays saved either way.
  pub async fn generate_summary(
    &self,
    user_id: Uuid,
    data: GenerateSummaryData,
    today: NaiveDate,
  ) -> Result<Summary, StudyError> {
    let limit = self.config.daily_summary_limit;
    let consumed = self
      .user_repo
      .try_consume_usage(user_id, UsageKind::Summary, today, limit)
      .await?;
    if !consumed {
      tracing::info!(user_id = %user_id, limit, "Daily summary limit reached");
      return Err(StudyError::DailySummaryLimitReached { limit });
    }

    match self.build_summary(user_id, data).await {
      Ok(summary) => {
        tracing::info!(
          summary_id = %summary.id,
          material_id = ?summary.material_id,
          "Summary generated"
        );
        Ok(summary)
      }
      Err(e) => {
        if let Err(release_err) = self
          .user_repo
          .release_usage(user_id, UsageKind::Summary, today)
          .await
        {
          tracing::warn!(user_id = %user_id, "Failed to give back summary quota: {}", release_err);
        }
        Err(e)
      }
    }
  }

  async fn build_summary(
    &self,
    user_id: Uuid,
    data: GenerateSummaryData,
  ) -> Result<Summary, StudyError> {
    let material = self.owned_material(user_id, data.material_id).await?;
    self.owned_subject(user_id, data.subject_id).await?;

    let content = match data.content.filter(|c| !c.trim().is_empty()) {
      Some(content) => SummaryContent::new(content)?,
      None => self.summarize_material(&material).await?,
    };

    let title = match data.title.filter(|t| !t.trim().is_empty()) {
      Some(title) => SummaryTitle::new(title)?,
      None => SummaryTitle::for_material(&material.original_name),
    };

    let summary = Summary::new(
      user_id,
      data.subject_id,
      Some(material.id),
      title,
      content,
    );
    self.summary_repo.create(summary).await
  }

  pub async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, StudyError> {
    Ok(DashboardStats {
      total_subjects: self.subject_repo.count_by_user(user_id).await?,
      total_summaries: self.summary_repo.count_by_user(user_id).await?,
      total_materials: self.material_repo.count_by_user(user_id).await?,
    })
  }

  async fn summarize_material(&self, material: &Material) -> Result<SummaryContent, StudyError> {
    let bytes = self.read_stored_file(material).await?;
    let text = self
      .extractor
      .extract(bytes, &material.original_name)
      .await?;

    if text.trim().is_empty() {
      return Err(StudyError::TextCannotBeExtracted(
        material.original_name.clone(),
      ));
    }

    let summarizer = Arc::clone(&self.summarizer);
    let max_words = self.config.summary_max_words;
    let summary = tokio::task::spawn_blocking(move || summarizer.summarize(&text, max_words))
      .await
      .map_err(|e| StudyError::Internal(format!("Summarizer task failed: {}", e)))?;

    Ok(SummaryContent::new(summary)?)
  }

  async fn owned_subject(&self, user_id: Uuid, subject_id: Uuid) -> Result<Subject, StudyError> {
    self
      .subject_repo
      .find_by_id_and_user(subject_id, user_id)
      .await?
      .ok_or(StudyError::SubjectNotFound(subject_id))
  }

  async fn owned_material(
    &self,
    user_id: Uuid,
    material_id: Uuid,
  ) -> Result<Material, StudyError> {
    self
      .material_repo
      .find_by_id_and_user(material_id, user_id)
      .await?
      .ok_or(StudyError::MaterialNotFound(material_id))
  }

  async fn read_stored_file(&self, material: &Material) -> Result<Vec<u8>, StudyError> {
    match self.storage.read(&material.storage_name).await {
      Ok(bytes) => Ok(bytes),
      Err(StorageError::NotFound(name)) => {
        tracing::warn!(material_id = %material.id, storage_name = %name, "Stored file is missing");
        Err(StudyError::MaterialNotFound(material.id))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn remove_stored_file(&self, material: &Material) {
    if let Err(e) = self.storage.delete(&material.storage_name).await {
      tracing::warn!(
        material_id = %material.id,
        storage_name = %material.storage_name,
        "Failed to remove stored file: {}",
        e
      );
    }
  }
}
