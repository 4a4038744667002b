pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Feedback, FeedbackKind, NewFeedback, Rating};
pub use errors::FeedbackError;
pub use ports::FeedbackRepository;
pub use services::{FeedbackInput, FeedbackService};
