use chrono::Local;
use std::sync::Arc;
use uuid::Uuid;

use super::responses::SummaryResponse;
use crate::domain::study::{GenerateSummaryData, StudyError, StudyService};

#[derive(Debug, Clone)]
pub struct GenerateSummaryCommand {
  pub user_id: Uuid,
  pub material_id: Uuid,
  pub subject_id: Uuid,
  pub title: Option<String>,
  pub content: Option<String>,
}

/// Builds a summary from a material, counted against the daily quota
pub struct GenerateSummaryUseCase {
  study_service: Arc<StudyService>,
}

impl GenerateSummaryUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(
    &self,
    command: GenerateSummaryCommand,
  ) -> Result<SummaryResponse, StudyError> {
    let data = GenerateSummaryData {
      material_id: command.material_id,
      subject_id: command.subject_id,
      title: command.title,
      content: command.content,
    };

    // Quotas follow the server's calendar day
    let today = Local::now().date_naive();

    let summary = self
      .study_service
      .generate_summary(command.user_id, data, today)
      .await?;

    Ok(summary.into())
  }
}
