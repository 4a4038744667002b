use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::AuthError;
use crate::domain::errors::RepositoryError;
use crate::domain::feedback::FeedbackError;
use crate::domain::study::{ExtractionError, StudyError};

use super::dtos::ErrorResponse;

pub const SUMMARY_LIMIT_CODE: &str = "LIMIT_RESUMO_PREMIUM";
pub const FEEDBACK_LIMIT_CODE: &str = "LIMIT_FEEDBACK";

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication error (401 Unauthorized or 409 Conflict)
  Auth(AuthErrorKind),

  /// Resource missing or owned by someone else (404)
  NotFound(String),

  /// Upload over the configured size (413)
  PayloadTooLarge(String),

  /// Request understood but cannot be processed (422)
  Unprocessable(String),

  /// Daily quota exhausted (429)
  LimitReached { message: String, code: &'static str },

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// Wrong email or password (401)
  InvalidCredentials,

  /// Missing, malformed or expired bearer token (401)
  InvalidToken,

  /// Email already exists (409)
  EmailAlreadyExists,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
      ApiError::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
      ApiError::LimitReached { code, .. } => write!(f, "Limit reached: {}", code),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ApiError {
  fn message(&self) -> String {
    match self {
      ApiError::Validation(msg)
      | ApiError::NotFound(msg)
      | ApiError::PayloadTooLarge(msg)
      | ApiError::Unprocessable(msg) => msg.clone(),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => "E-mail ou senha inválidos".to_string(),
        AuthErrorKind::InvalidToken => "Token de acesso ausente, inválido ou expirado".to_string(),
        AuthErrorKind::EmailAlreadyExists => "Este e-mail já está cadastrado".to_string(),
      },
      ApiError::LimitReached { message, .. } => message.clone(),
      ApiError::Internal(_) => "Ocorreu um erro interno no servidor".to_string(),
    }
  }

  fn code(&self) -> Option<&'static str> {
    match self {
      ApiError::LimitReached { code, .. } => Some(code),
      _ => None,
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
      },
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::LimitReached { .. } => StatusCode::TOO_MANY_REQUESTS,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();

    if let ApiError::Internal(msg) = self {
      // Never exposed to the client
      tracing::error!("Internal error: {}", msg);
    }

    let error_response = ErrorResponse {
      status: status.as_u16(),
      error: status.canonical_reason().unwrap_or("Error").to_string(),
      message: self.message(),
      code: self.code().map(str::to_string),
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

fn repository_error(error: RepositoryError) -> ApiError {
  match error {
    RepositoryError::NotFound => ApiError::NotFound("Registro não encontrado".to_string()),
    _ => ApiError::Internal(error.to_string()),
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::InvalidAccessToken => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::UserNotFound => ApiError::NotFound("Usuário não encontrado".to_string()),
      AuthError::InvalidConfirmationToken => {
        ApiError::Validation("Token inválido, expirado ou já utilizado.".to_string())
      }
      AuthError::ConfirmationTokenExpired => {
        ApiError::Validation("Token de confirmação expirado".to_string())
      }
      AuthError::EmailAlreadyConfirmed => {
        ApiError::Validation("Este e-mail já foi confirmado".to_string())
      }
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        other => repository_error(other),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::TokenSigning(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert StudyError to ApiError
impl From<StudyError> for ApiError {
  fn from(error: StudyError) -> Self {
    match error {
      StudyError::Validation(err) => ApiError::Validation(err.to_string()),
      StudyError::SubjectNotFound(_) => {
        ApiError::NotFound("Disciplina não encontrada".to_string())
      }
      StudyError::MaterialNotFound(_) => ApiError::NotFound("Material não encontrado".to_string()),
      StudyError::SummaryNotFound(_) => ApiError::NotFound("Resumo não encontrado".to_string()),
      StudyError::DailySummaryLimitReached { limit } => ApiError::LimitReached {
        message: format!(
          "Você atingiu seu limite de {} resumos diários. Volte amanhã!",
          limit
        ),
        code: SUMMARY_LIMIT_CODE,
      },
      StudyError::EmptyFile => ApiError::Validation("O arquivo enviado está vazio".to_string()),
      StudyError::FileTooLarge { max_bytes } => ApiError::PayloadTooLarge(format!(
        "O arquivo excede o tamanho máximo permitido de {} bytes",
        max_bytes
      )),
      StudyError::TextCannotBeExtracted(name) => ApiError::Unprocessable(format!(
        "Não foi possível extrair texto do arquivo '{}'",
        name
      )),
      StudyError::Extraction(ExtractionError::Encrypted) => {
        ApiError::Unprocessable("O PDF está protegido por senha".to_string())
      }
      StudyError::Extraction(err) => ApiError::Internal(err.to_string()),
      StudyError::Storage(err) => ApiError::Internal(err.to_string()),
      StudyError::Repository(err) => repository_error(err),
      StudyError::Auth(err) => ApiError::from(err),
      StudyError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert FeedbackError to ApiError
impl From<FeedbackError> for ApiError {
  fn from(error: FeedbackError) -> Self {
    match error {
      FeedbackError::InvalidKind(_) | FeedbackError::InvalidRating(_) => {
        ApiError::Validation(error.to_string())
      }
      FeedbackError::Validation(msg) => ApiError::Validation(msg),
      FeedbackError::DailyLimitReached { limit } => ApiError::LimitReached {
        message: format!(
          "Você atingiu o limite de {} feedbacks por dia. Volte amanhã! 🚀",
          limit
        ),
        code: FEEDBACK_LIMIT_CODE,
      },
      FeedbackError::Repository(err) => repository_error(err),
      FeedbackError::Auth(err) => ApiError::from(err),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Campo inválido: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;
  use uuid::Uuid;

  async fn body_json(error: ApiError) -> serde_json::Value {
    let response = error.error_response();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::EmailAlreadyExists).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = AuthError::ConfirmationTokenExpired.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError =
      AuthError::Repository(RepositoryError::DuplicateKey("users_email_key".into())).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn test_study_error_conversion() {
    let cases = [
      (StudyError::SubjectNotFound(Uuid::new_v4()), StatusCode::NOT_FOUND),
      (StudyError::MaterialNotFound(Uuid::new_v4()), StatusCode::NOT_FOUND),
      (StudyError::EmptyFile, StatusCode::BAD_REQUEST),
      (
        StudyError::FileTooLarge { max_bytes: 10 },
        StatusCode::PAYLOAD_TOO_LARGE,
      ),
      (
        StudyError::TextCannotBeExtracted("a.pdf".into()),
        StatusCode::UNPROCESSABLE_ENTITY,
      ),
      (
        StudyError::DailySummaryLimitReached { limit: 3 },
        StatusCode::TOO_MANY_REQUESTS,
      ),
      (
        StudyError::Repository(RepositoryError::QueryFailed("boom".into())),
        StatusCode::INTERNAL_SERVER_ERROR,
      ),
    ];

    for (error, status) in cases {
      assert_eq!(ApiError::from(error).status_code(), status);
    }
  }

  #[actix_web::test]
  async fn test_summary_limit_body() {
    let body = body_json(StudyError::DailySummaryLimitReached { limit: 3 }.into()).await;

    assert_eq!(body["status"], 429);
    assert_eq!(body["error"], "Too Many Requests");
    assert_eq!(body["code"], SUMMARY_LIMIT_CODE);
    assert_eq!(
      body["message"],
      "Você atingiu seu limite de 3 resumos diários. Volte amanhã!"
    );
  }

  #[actix_web::test]
  async fn test_feedback_limit_body() {
    let body = body_json(FeedbackError::DailyLimitReached { limit: 2 }.into()).await;

    assert_eq!(body["code"], FEEDBACK_LIMIT_CODE);
    assert_eq!(
      body["message"],
      "Você atingiu o limite de 2 feedbacks por dia. Volte amanhã! 🚀"
    );
  }

  #[actix_web::test]
  async fn test_internal_error_hides_details() {
    let body = body_json(ApiError::Internal("password=hunter2".into())).await;

    assert_eq!(body["status"], 500);
    assert!(!body["message"].as_str().unwrap().contains("hunter2"));
    assert!(body.get("code").is_none());
  }
}
