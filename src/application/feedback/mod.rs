//! Feedback use cases

mod submit_feedback;

pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackResponse, SubmitFeedbackUseCase};
