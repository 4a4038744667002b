use std::sync::Arc;
use uuid::Uuid;

use super::responses::{MaterialResponse, SubjectResponse, SummaryResponse};
use crate::domain::study::{PageRequest, StudyError, StudyService};

#[derive(Debug, Clone)]
pub struct GetSubjectDetailsCommand {
  pub user_id: Uuid,
  pub subject_id: Uuid,
  pub page: Option<u32>,
  pub size: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SubjectDetailsResponse {
  pub subject: SubjectResponse,
  pub summaries: Vec<SummaryResponse>,
  /// One page of the subject's materials
  pub materials: Vec<MaterialResponse>,
}

pub struct GetSubjectDetailsUseCase {
  study_service: Arc<StudyService>,
}

impl GetSubjectDetailsUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(
    &self,
    command: GetSubjectDetailsCommand,
  ) -> Result<SubjectDetailsResponse, StudyError> {
    let page = PageRequest::new(command.page, command.size);

    let details = self
      .study_service
      .subject_details(command.user_id, command.subject_id, page)
      .await?;

    Ok(SubjectDetailsResponse {
      subject: details.subject.into(),
      summaries: details.summaries.into_iter().map(Into::into).collect(),
      materials: details.materials.into_iter().map(Into::into).collect(),
    })
  }
}
