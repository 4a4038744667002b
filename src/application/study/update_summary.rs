use std::sync::Arc;
use uuid::Uuid;

use super::responses::SummaryResponse;
use crate::domain::study::{StudyError, StudyService, SummaryContent, SummaryTitle};

#[derive(Debug, Clone)]
pub struct UpdateSummaryCommand {
  pub user_id: Uuid,
  pub summary_id: Uuid,
  pub title: String,
  pub content: String,
}

pub struct UpdateSummaryUseCase {
  study_service: Arc<StudyService>,
}

impl UpdateSummaryUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, command: UpdateSummaryCommand) -> Result<SummaryResponse, StudyError> {
    let title = SummaryTitle::new(command.title)?;
    let content = SummaryContent::new(command.content)?;

    let summary = self
      .study_service
      .update_summary(command.user_id, command.summary_id, title, content)
      .await?;

    Ok(summary.into())
  }
}
