//! Request and response bodies of the HTTP API.
//!
//! Field names follow the web client's Portuguese camelCase contract.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::feedback::SubmitFeedbackResponse;
use crate::application::study::{
  DashboardStatsResponse, MaterialResponse, RecentMaterialResponse, SubjectDetailsResponse,
  SubjectResponse, SummaryResponse,
};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_TIME_FORMAT: &str = "%d/%m/%Y às %H:%M";

// ============================================================================
// Auth
// ============================================================================

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[serde(rename = "nome")]
  #[validate(length(
    min = 1,
    max = 100,
    message = "O nome é obrigatório e deve ter no máximo 100 caracteres"
  ))]
  pub name: String,

  #[validate(email(message = "E-mail inválido"))]
  pub email: String,

  #[serde(rename = "senha")]
  #[validate(length(
    min = 8,
    max = 128,
    message = "A senha deve ter entre 8 e 128 caracteres"
  ))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "O e-mail é obrigatório"))]
  pub email: String,

  #[serde(rename = "senha")]
  #[validate(length(min = 1, message = "A senha é obrigatória"))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmEmailQuery {
  pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub id: Uuid,
  #[serde(rename = "nome")]
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmEmailResponse {
  pub token: String,
  #[serde(rename = "nome")]
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  #[serde(rename = "nome")]
  pub name: String,
  pub email: String,
}

// ============================================================================
// Subjects
// ============================================================================

/// Body of subject create and update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubjectRequest {
  #[serde(rename = "nome")]
  #[validate(length(
    min = 1,
    max = 100,
    message = "O nome da disciplina é obrigatório e deve ter no máximo 100 caracteres"
  ))]
  pub name: String,

  #[serde(rename = "descricao", default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
  pub page: Option<u32>,
  pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDto {
  pub id: Uuid,
  #[serde(rename = "nome")]
  pub name: String,
  #[serde(rename = "descricao")]
  pub description: Option<String>,
}

impl From<SubjectResponse> for SubjectDto {
  fn from(subject: SubjectResponse) -> Self {
    Self {
      id: subject.subject_id,
      name: subject.name,
      description: subject.description,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryItemDto {
  pub id: Uuid,
  #[serde(rename = "titulo")]
  pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialItemDto {
  pub id: Uuid,
  #[serde(rename = "nomeArquivo")]
  pub file_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetailsDto {
  pub id: Uuid,
  #[serde(rename = "nome")]
  pub name: String,
  #[serde(rename = "descricao")]
  pub description: Option<String>,
  #[serde(rename = "resumos")]
  pub summaries: Vec<SummaryItemDto>,
  #[serde(rename = "materiais")]
  pub materials: Vec<MaterialItemDto>,
}

impl From<SubjectDetailsResponse> for SubjectDetailsDto {
  fn from(details: SubjectDetailsResponse) -> Self {
    Self {
      id: details.subject.subject_id,
      name: details.subject.name,
      description: details.subject.description,
      summaries: details
        .summaries
        .into_iter()
        .map(|s| SummaryItemDto {
          id: s.summary_id,
          title: s.title,
        })
        .collect(),
      materials: details
        .materials
        .into_iter()
        .map(|m| MaterialItemDto {
          id: m.material_id,
          file_name: m.original_name,
        })
        .collect(),
    }
  }
}

// ============================================================================
// Materials
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialListQuery {
  pub disciplina_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialDto {
  pub id: Uuid,
  #[serde(rename = "disciplinaId")]
  pub subject_id: Uuid,
  #[serde(rename = "nomeOriginal")]
  pub original_name: String,
  #[serde(rename = "tipoArquivo")]
  pub content_type: String,
  #[serde(rename = "tamanho")]
  pub size_bytes: u64,
  #[serde(rename = "tamanhoFormatado")]
  pub size_formatted: String,
  #[serde(rename = "dataUpload")]
  pub uploaded_at: DateTime<Utc>,
}

impl From<MaterialResponse> for MaterialDto {
  fn from(material: MaterialResponse) -> Self {
    Self {
      id: material.material_id,
      subject_id: material.subject_id,
      original_name: material.original_name,
      content_type: material.content_type,
      size_bytes: material.size_bytes,
      size_formatted: material.size_formatted,
      uploaded_at: material.uploaded_at,
    }
  }
}

/// Dashboard card for a recently uploaded material
#[derive(Debug, Clone, Serialize)]
pub struct RecentMaterialDto {
  pub id: Uuid,
  #[serde(rename = "nome")]
  pub name: String,
  #[serde(rename = "nomeDisciplina")]
  pub subject_name: String,
  #[serde(rename = "dataUploadFormatada")]
  pub uploaded_at: String,
  #[serde(rename = "tamanhoFormatado")]
  pub size_formatted: String,
}

impl From<RecentMaterialResponse> for RecentMaterialDto {
  fn from(recent: RecentMaterialResponse) -> Self {
    Self {
      id: recent.material.material_id,
      name: recent.material.original_name,
      subject_name: recent
        .subject_name
        .unwrap_or_else(|| "Sem disciplina".to_string()),
      uploaded_at: recent
        .material
        .uploaded_at
        .with_timezone(&Local)
        .format(DATE_FORMAT)
        .to_string(),
      size_formatted: recent.material.size_formatted,
    }
  }
}

// ============================================================================
// Summaries
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryListQuery {
  pub disciplina_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSummaryRequest {
  #[serde(rename = "disciplinaId")]
  pub subject_id: Uuid,

  #[serde(rename = "titulo")]
  #[validate(length(
    min = 1,
    max = 255,
    message = "O título do resumo é obrigatório e deve ter no máximo 255 caracteres"
  ))]
  pub title: String,

  #[serde(rename = "conteudo")]
  #[validate(length(min = 1, message = "O conteúdo do resumo é obrigatório"))]
  pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSummaryRequest {
  #[serde(rename = "titulo")]
  #[validate(length(
    min = 1,
    max = 255,
    message = "O título do resumo é obrigatório e deve ter no máximo 255 caracteres"
  ))]
  pub title: String,

  #[serde(rename = "conteudo")]
  #[validate(length(min = 1, message = "O conteúdo do resumo é obrigatório"))]
  pub content: String,
}

/// Title and content are optional: both are derived from the material
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSummaryRequest {
  #[serde(rename = "materialId")]
  pub material_id: Uuid,

  #[serde(rename = "disciplinaId")]
  pub subject_id: Uuid,

  #[serde(rename = "titulo", default)]
  pub title: Option<String>,

  #[serde(rename = "conteudo", default)]
  pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryDto {
  pub id: Uuid,
  #[serde(rename = "disciplinaId")]
  pub subject_id: Uuid,
  #[serde(rename = "materialId")]
  pub material_id: Option<Uuid>,
  #[serde(rename = "titulo")]
  pub title: String,
  #[serde(rename = "conteudo")]
  pub content: String,
  #[serde(rename = "dataCriacao")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "dataAtualizacao")]
  pub updated_at: DateTime<Utc>,
}

impl From<SummaryResponse> for SummaryDto {
  fn from(summary: SummaryResponse) -> Self {
    Self {
      id: summary.summary_id,
      subject_id: summary.subject_id,
      material_id: summary.material_id,
      title: summary.title,
      content: summary.content,
      created_at: summary.created_at,
      updated_at: summary.updated_at,
    }
  }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
  pub total_disciplinas: i64,
  pub resumos_criados: i64,
  pub total_materiais: i64,
}

impl From<DashboardStatsResponse> for DashboardStatsDto {
  fn from(stats: DashboardStatsResponse) -> Self {
    Self {
      total_disciplinas: stats.total_subjects,
      resumos_criados: stats.total_summaries,
      total_materiais: stats.total_materials,
    }
  }
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackRequest {
  #[serde(rename = "tipo")]
  #[validate(length(min = 1, message = "O tipo do feedback é obrigatório"))]
  pub kind: String,

  /// 0 or absent means no rating
  #[serde(default)]
  pub rating: Option<u8>,

  #[serde(rename = "mensagem")]
  #[validate(length(min = 1, message = "A mensagem do feedback é obrigatória"))]
  pub message: String,

  #[serde(rename = "emailUsuario", default)]
  pub user_email: Option<String>,

  #[serde(rename = "pagina", default)]
  pub page: String,

  #[serde(rename = "userAgent", default)]
  pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
  pub id: i64,
  #[serde(rename = "tipo")]
  pub kind: String,
  #[serde(rename = "mensagemStatus")]
  pub status_message: String,
  #[serde(rename = "dataEnvioFormatada")]
  pub sent_at: String,
}

impl From<SubmitFeedbackResponse> for FeedbackResponse {
  fn from(response: SubmitFeedbackResponse) -> Self {
    Self {
      id: response.feedback_id,
      kind: response.kind.as_str().to_string(),
      status_message: response.status_message,
      sent_at: response
        .created_at
        .with_timezone(&Local)
        .format(DATE_TIME_FORMAT)
        .to_string(),
    }
  }
}

// ============================================================================
// Errors
// ============================================================================

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub status: u16,

  /// Reason phrase of the status, e.g. "Not Found"
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Machine readable code for quota errors
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::feedback::FeedbackKind;

  #[test]
  fn test_register_request_validation_valid() {
    let request: RegisterRequest = serde_json::from_str(
      r#"{"nome": "Maria", "email": "maria@example.com", "senha": "senha-forte-1"}"#,
    )
    .unwrap();

    assert!(request.validate().is_ok());
    assert_eq!(request.name, "Maria");
  }

  #[test]
  fn test_register_request_validation_invalid_email() {
    let request = RegisterRequest {
      name: "Maria".to_string(),
      email: "invalid-email".to_string(),
      password: "senha-forte-1".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_short_password() {
    let request = RegisterRequest {
      name: "Maria".to_string(),
      email: "maria@example.com".to_string(),
      password: "curta".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_generate_request_optional_fields() {
    let id = Uuid::new_v4();
    let json = format!(r#"{{"materialId": "{id}", "disciplinaId": "{id}"}}"#);
    let request: GenerateSummaryRequest = serde_json::from_str(&json).unwrap();

    assert_eq!(request.material_id, id);
    assert!(request.title.is_none());
    assert!(request.content.is_none());
  }

  #[test]
  fn test_feedback_request_defaults() {
    let request: FeedbackRequest =
      serde_json::from_str(r#"{"tipo": "BUG", "mensagem": "quebrou"}"#).unwrap();

    assert!(request.validate().is_ok());
    assert_eq!(request.rating, None);
    assert_eq!(request.page, "");
    assert_eq!(request.user_agent, None);
  }

  #[test]
  fn test_dashboard_stats_field_names() {
    let dto = DashboardStatsDto::from(DashboardStatsResponse {
      total_subjects: 2,
      total_summaries: 5,
      total_materials: 1,
    });

    let json = serde_json::to_value(dto).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"totalDisciplinas": 2, "resumosCriados": 5, "totalMateriais": 1})
    );
  }

  #[test]
  fn test_recent_material_formatting() {
    let uploaded_at = Utc::now();
    let dto = RecentMaterialDto::from(RecentMaterialResponse {
      material: MaterialResponse {
        material_id: Uuid::new_v4(),
        subject_id: Uuid::new_v4(),
        original_name: "aula.pdf".into(),
        content_type: "application/pdf".into(),
        size_bytes: 1536,
        size_formatted: "1.5 KB".into(),
        uploaded_at,
      },
      subject_name: None,
    });

    assert_eq!(dto.subject_name, "Sem disciplina");
    assert_eq!(
      dto.uploaded_at,
      uploaded_at.with_timezone(&Local).format("%d/%m/%Y").to_string()
    );

    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["tamanhoFormatado"], "1.5 KB");
    assert_eq!(json["nome"], "aula.pdf");
  }

  #[test]
  fn test_feedback_response_shape() {
    let dto = FeedbackResponse::from(SubmitFeedbackResponse {
      feedback_id: 9,
      kind: FeedbackKind::Bug,
      status_message: FeedbackKind::Bug.status_message().to_string(),
      created_at: Utc::now(),
    });

    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["tipo"], "BUG");
    assert!(json["dataEnvioFormatada"].as_str().unwrap().contains(" às "));
  }
}
