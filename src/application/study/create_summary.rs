use std::sync::Arc;
use uuid::Uuid;

use super::responses::SummaryResponse;
use crate::domain::study::{StudyError, StudyService, SummaryContent, SummaryTitle};

#[derive(Debug, Clone)]
pub struct CreateSummaryCommand {
  pub user_id: Uuid,
  pub subject_id: Uuid,
  pub title: String,
  pub content: String,
}

pub struct CreateSummaryUseCase {
  study_service: Arc<StudyService>,
}

impl CreateSummaryUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, command: CreateSummaryCommand) -> Result<SummaryResponse, StudyError> {
    let title = SummaryTitle::new(command.title)?;
    let content = SummaryContent::new(command.content)?;

    let summary = self
      .study_service
      .create_summary(command.user_id, command.subject_id, title, content)
      .await?;

    Ok(summary.into())
  }
}
