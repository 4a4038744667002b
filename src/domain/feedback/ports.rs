use async_trait::async_trait;

use super::entities::{Feedback, NewFeedback};
use super::errors::FeedbackError;

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
  /// Stores the feedback and returns it with its generated id
  async fn create(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackError>;
}
