use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Feedback, FeedbackKind, NewFeedback, Rating};
use super::errors::FeedbackError;
use super::ports::FeedbackRepository;
use crate::domain::auth::{Email, UsageKind, UserRepository};
use crate::domain::notifications::Notifier;

/// Raw feedback as submitted by the client
#[derive(Debug, Clone)]
pub struct FeedbackInput {
  pub kind: String,
  pub rating: Option<u8>,
  pub message: String,
  pub user_email: Option<String>,
  pub page: String,
  pub user_agent: String,
}

pub struct FeedbackService {
  feedback_repo: Arc<dyn FeedbackRepository>,
  user_repo: Arc<dyn UserRepository>,
  notifier: Arc<dyn Notifier>,
  daily_limit: u32,
}

impl FeedbackService {
  pub fn new(
    feedback_repo: Arc<dyn FeedbackRepository>,
    user_repo: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
    daily_limit: u32,
  ) -> Self {
    Self {
      feedback_repo,
      user_repo,
      notifier,
      daily_limit,
    }
  }

  pub fn daily_limit(&self) -> u32 {
    self.daily_limit
  }

  /// Stores a feedback from `user_id` and forwards it to the team inbox
  pub async fn submit(
    &self,
    user_id: Uuid,
    input: FeedbackInput,
    today: NaiveDate,
  ) -> Result<Feedback, FeedbackError> {
    let new_feedback = Self::validate(user_id, input)?;

    let consumed = self
      .user_repo
      .try_consume_usage(user_id, UsageKind::Feedback, today, self.daily_limit)
      .await?;
    if !consumed {
      tracing::info!(user_id = %user_id, limit = self.daily_limit, "Daily feedback limit reached");
      return Err(FeedbackError::DailyLimitReached {
        limit: self.daily_limit,
      });
    }

    let feedback = match self.feedback_repo.create(new_feedback).await {
      Ok(feedback) => feedback,
      Err(e) => {
        if let Err(release_err) = self
          .user_repo
          .release_usage(user_id, UsageKind::Feedback, today)
          .await
        {
          tracing::warn!(user_id = %user_id, "Failed to give back feedback quota: {}", release_err);
        }
        return Err(e);
      }
    };

    if let Err(e) = self.notifier.send_feedback_report(&feedback).await {
      tracing::warn!(feedback_id = feedback.id, "Failed to email feedback: {}", e);
    }

    tracing::info!(feedback_id = feedback.id, kind = %feedback.kind, "Feedback received");
    Ok(feedback)
  }

  fn validate(user_id: Uuid, input: FeedbackInput) -> Result<NewFeedback, FeedbackError> {
    let kind: FeedbackKind = input.kind.parse()?;
    let rating = Rating::optional(input.rating)?;

    let message = input.message.trim().to_string();
    if message.is_empty() {
      return Err(FeedbackError::Validation(
        "A mensagem do feedback é obrigatória".to_string(),
      ));
    }

    let user_email = match input.user_email.filter(|e| !e.trim().is_empty()) {
      Some(email) => Some(
        Email::new(email)
          .map_err(|e| FeedbackError::Validation(e.to_string()))?
          .into_inner(),
      ),
      None => None,
    };

    let page = input.page.trim().to_string();
    if page.is_empty() {
      return Err(FeedbackError::Validation(
        "A página de origem é obrigatória".to_string(),
      ));
    }

    let user_agent = input.user_agent.trim().to_string();
    if user_agent.is_empty() {
      return Err(FeedbackError::Validation(
        "O user agent é obrigatório".to_string(),
      ));
    }

    Ok(NewFeedback {
      user_id: Some(user_id),
      kind,
      rating,
      message,
      user_email,
      page,
      user_agent,
      created_at: Utc::now(),
    })
  }
}
