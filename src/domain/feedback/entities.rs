use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::FeedbackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackKind {
  Bug,
  Suggestion,
  Feature,
  Other,
}

impl FeedbackKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      FeedbackKind::Bug => "BUG",
      FeedbackKind::Suggestion => "SUGGESTION",
      FeedbackKind::Feature => "FEATURE",
      FeedbackKind::Other => "OTHER",
    }
  }

  /// Label shown in the notification email
  pub fn label(&self) -> &'static str {
    match self {
      FeedbackKind::Bug => "🐛 Erro / Bug",
      FeedbackKind::Suggestion => "💡 Sugestão",
      FeedbackKind::Feature => "✨ Nova Funcionalidade",
      FeedbackKind::Other => "📝 Outro",
    }
  }

  /// Acknowledgement returned to the client
  pub fn status_message(&self) -> &'static str {
    match self {
      FeedbackKind::Bug => "Bug reportado com sucesso. Iremos investigar!",
      FeedbackKind::Suggestion => "Sugestão recebida. Obrigado pela contribuição!",
      FeedbackKind::Feature => "Ideia de feature anotada. Adoramos a sugestão!",
      FeedbackKind::Other => "Feedback recebido com sucesso. Obrigado!",
    }
  }
}

impl FromStr for FeedbackKind {
  type Err = FeedbackError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "BUG" => Ok(FeedbackKind::Bug),
      "SUGGESTION" => Ok(FeedbackKind::Suggestion),
      "FEATURE" => Ok(FeedbackKind::Feature),
      "OTHER" => Ok(FeedbackKind::Other),
      _ => Err(FeedbackError::InvalidKind(s.to_string())),
    }
  }
}

impl fmt::Display for FeedbackKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Star rating, 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
  pub fn new(value: u8) -> Result<Self, FeedbackError> {
    if !(1..=5).contains(&value) {
      return Err(FeedbackError::InvalidRating(value));
    }
    Ok(Self(value))
  }

  /// Zero is how clients say "no rating"
  pub fn optional(value: Option<u8>) -> Result<Option<Self>, FeedbackError> {
    match value {
      None | Some(0) => Ok(None),
      Some(v) => Self::new(v).map(Some),
    }
  }

  pub fn value(&self) -> u8 {
    self.0
  }

  pub fn stars(&self) -> String {
    "⭐".repeat(usize::from(self.0))
  }
}

/// Validated feedback waiting to be stored
#[derive(Debug, Clone)]
pub struct NewFeedback {
  pub user_id: Option<Uuid>,
  pub kind: FeedbackKind,
  pub rating: Option<Rating>,
  pub message: String,
  pub user_email: Option<String>,
  pub page: String,
  pub user_agent: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Feedback {
  pub id: i64,
  pub user_id: Option<Uuid>,
  pub kind: FeedbackKind,
  pub rating: Option<Rating>,
  pub message: String,
  pub user_email: Option<String>,
  pub page: String,
  pub user_agent: String,
  pub created_at: DateTime<Utc>,
}

impl Feedback {
  pub fn from_new(id: i64, new: NewFeedback) -> Self {
    Self {
      id,
      user_id: new.user_id,
      kind: new.kind,
      rating: new.rating,
      message: new.message,
      user_email: new.user_email,
      page: new.page,
      user_agent: new.user_agent,
      created_at: new.created_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_parses_case_insensitively() {
    assert_eq!("bug".parse::<FeedbackKind>().unwrap(), FeedbackKind::Bug);
    assert_eq!(" Feature ".parse::<FeedbackKind>().unwrap(), FeedbackKind::Feature);
    assert!("praise".parse::<FeedbackKind>().is_err());
  }

  #[test]
  fn test_rating_zero_means_none() {
    assert_eq!(Rating::optional(Some(0)).unwrap(), None);
    assert_eq!(Rating::optional(None).unwrap(), None);
    assert_eq!(Rating::optional(Some(4)).unwrap().unwrap().stars(), "⭐⭐⭐⭐");
    assert!(Rating::optional(Some(6)).is_err());
  }
}
