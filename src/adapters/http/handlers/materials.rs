use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{
  HttpRequest, HttpResponse,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web,
};
use futures_util::TryStreamExt;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{
  dtos::{MaterialDto, MaterialListQuery},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::study::*;
use crate::domain::study::StudyError;

const FILE_FIELD: &str = "arquivo";
const SUBJECT_FIELD: &str = "disciplinaId";
const MAX_TEXT_FIELD_BYTES: usize = 128;

/// Parts of the upload form
#[derive(Debug, Default)]
struct UploadForm {
  file_name: Option<String>,
  content_type: Option<String>,
  bytes: Option<Vec<u8>>,
  subject_id: Option<Uuid>,
}

fn multipart_error(error: MultipartError) -> ApiError {
  ApiError::Validation(format!("Formulário de upload inválido: {}", error))
}

/// Reads a file part, failing as soon as it grows past `max_bytes`
async fn read_file(field: &mut Field, max_bytes: u64) -> Result<Vec<u8>, ApiError> {
  let mut bytes = Vec::new();
  while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
    if (bytes.len() + chunk.len()) as u64 > max_bytes {
      return Err(StudyError::FileTooLarge { max_bytes }.into());
    }
    bytes.extend_from_slice(&chunk);
  }
  Ok(bytes)
}

async fn read_text(field: &mut Field) -> Result<String, ApiError> {
  let mut bytes = Vec::new();
  while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
    bytes.extend_from_slice(&chunk);
    if bytes.len() > MAX_TEXT_FIELD_BYTES {
      return Err(ApiError::Validation("Campo de formulário muito longo".to_string()));
    }
  }
  String::from_utf8(bytes).map_err(|_| ApiError::Validation("Campo de formulário inválido".to_string()))
}

async fn read_upload_form(payload: &mut Multipart, max_bytes: u64) -> Result<UploadForm, ApiError> {
  let mut form = UploadForm::default();

  while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
    let name = field
      .content_disposition()
      .and_then(|cd| cd.get_name())
      .map(str::to_string);

    match name.as_deref() {
      Some(FILE_FIELD) => {
        form.file_name = field
          .content_disposition()
          .and_then(|cd| cd.get_filename())
          .map(str::to_string);
        form.content_type = field.content_type().map(|m| m.to_string());
        form.bytes = Some(read_file(&mut field, max_bytes).await?);
      }
      Some(SUBJECT_FIELD) => {
        let raw = read_text(&mut field).await?;
        let subject_id = Uuid::parse_str(raw.trim())
          .map_err(|_| ApiError::Validation("disciplinaId inválido".to_string()))?;
        form.subject_id = Some(subject_id);
      }
      _ => {
        // Unknown parts are drained and ignored
        while field.try_next().await.map_err(multipart_error)?.is_some() {}
      }
    }
  }

  Ok(form)
}

/// Upload a material into a subject
/// POST /materiais (multipart: arquivo, disciplinaId)
pub async fn upload_material_handler(
  mut payload: Multipart,
  use_case: web::Data<Arc<UploadMaterialUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let form = read_upload_form(&mut payload, use_case.max_file_size_bytes()).await?;

  let subject_id = form
    .subject_id
    .ok_or_else(|| ApiError::Validation("O campo disciplinaId é obrigatório".to_string()))?;
  let bytes = form
    .bytes
    .ok_or_else(|| ApiError::Validation("O campo arquivo é obrigatório".to_string()))?;

  let command = UploadMaterialCommand {
    user_id: user.id,
    subject_id,
    file_name: form.file_name.unwrap_or_default(),
    content_type: form.content_type,
    bytes,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(MaterialDto::from(response)))
}

/// GET /materiais?disciplinaId=
pub async fn list_materials_handler(
  query: web::Query<MaterialListQuery>,
  use_case: web::Data<Arc<ListMaterialsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let materials = use_case.execute(user.id, query.disciplina_id).await?;
  let body: Vec<MaterialDto> = materials.into_iter().map(Into::into).collect();

  Ok(HttpResponse::Ok().json(body))
}

/// DELETE /materiais/{id}
pub async fn delete_material_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteMaterialUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}

/// GET /materiais/{id}/download
pub async fn download_material_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetMaterialFileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  serve_material(path.into_inner(), &use_case, &http_req, DispositionType::Attachment).await
}

/// GET /materiais/{id}/visualizar
pub async fn view_material_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetMaterialFileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  serve_material(path.into_inner(), &use_case, &http_req, DispositionType::Inline).await
}

async fn serve_material(
  material_id: Uuid,
  use_case: &GetMaterialFileUseCase,
  http_req: &HttpRequest,
  disposition: DispositionType,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(http_req)?;

  let file = use_case.execute(user.id, material_id).await?;

  Ok(
    HttpResponse::Ok()
      .content_type(file.content_type)
      .insert_header(ContentDisposition {
        disposition,
        parameters: vec![DispositionParam::Filename(file.file_name)],
      })
      .body(file.bytes),
  )
}
