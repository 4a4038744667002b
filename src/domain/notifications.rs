use async_trait::async_trait;
use thiserror::Error;

use crate::domain::feedback::entities::Feedback;

#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Failed to render email: {0}")]
  Render(String),

  #[error("Email delivery failed: {0}")]
  Delivery(String),
}

/// Welcome message carrying the email confirmation link
#[derive(Debug, Clone)]
pub struct AccountConfirmation {
  pub name: String,
  pub email: String,
  pub confirmation_link: String,
}

/// Outbound notifications. Callers treat failures as non-fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn send_account_confirmation(
    &self,
    message: AccountConfirmation,
  ) -> Result<(), NotificationError>;

  async fn send_feedback_report(&self, feedback: &Feedback) -> Result<(), NotificationError>;
}
