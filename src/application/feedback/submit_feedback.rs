use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::feedback::{FeedbackError, FeedbackInput, FeedbackKind, FeedbackService};

#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
  pub user_id: Uuid,
  pub kind: String,
  pub rating: Option<u8>,
  pub message: String,
  pub user_email: Option<String>,
  pub page: String,
  pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SubmitFeedbackResponse {
  pub feedback_id: i64,
  pub kind: FeedbackKind,
  pub status_message: String,
  pub created_at: DateTime<Utc>,
}

pub struct SubmitFeedbackUseCase {
  feedback_service: Arc<FeedbackService>,
}

impl SubmitFeedbackUseCase {
  pub fn new(feedback_service: Arc<FeedbackService>) -> Self {
    Self { feedback_service }
  }

  pub async fn execute(
    &self,
    command: SubmitFeedbackCommand,
  ) -> Result<SubmitFeedbackResponse, FeedbackError> {
    let input = FeedbackInput {
      kind: command.kind,
      rating: command.rating,
      message: command.message,
      user_email: command.user_email,
      page: command.page,
      user_agent: command.user_agent,
    };

    let feedback = self
      .feedback_service
      .submit(command.user_id, input, Local::now().date_naive())
      .await?;

    Ok(SubmitFeedbackResponse {
      feedback_id: feedback.id,
      kind: feedback.kind,
      status_message: feedback.kind.status_message().to_string(),
      created_at: feedback.created_at,
    })
  }
}
