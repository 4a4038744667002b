use std::sync::Arc;
use uuid::Uuid;

use super::responses::SubjectResponse;
use crate::domain::study::{StudyError, StudyService, SubjectName};

#[derive(Debug, Clone)]
pub struct UpdateSubjectCommand {
  pub user_id: Uuid,
  pub subject_id: Uuid,
  pub name: String,
  pub description: Option<String>,
}

pub struct UpdateSubjectUseCase {
  study_service: Arc<StudyService>,
}

impl UpdateSubjectUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, command: UpdateSubjectCommand) -> Result<SubjectResponse, StudyError> {
    let name = SubjectName::new(command.name)?;

    let subject = self
      .study_service
      .update_subject(
        command.user_id,
        command.subject_id,
        name,
        command.description,
      )
      .await?;

    Ok(subject.into())
  }
}
