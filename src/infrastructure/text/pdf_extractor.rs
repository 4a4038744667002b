use async_trait::async_trait;

use crate::domain::study::{ExtractionError, TextExtractor};

/// Extracts text from PDF documents with `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
  pub fn new() -> Self {
    Self
  }

  fn extract_blocking(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
      let message = e.to_string();
      if message.to_ascii_lowercase().contains("encrypt") {
        ExtractionError::Encrypted
      } else {
        ExtractionError::Unreadable(message)
      }
    })
  }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
  async fn extract(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, ExtractionError> {
    if file_name.trim().is_empty() {
      return Err(ExtractionError::InvalidInput(
        "file name is required".to_string(),
      ));
    }
    if bytes.is_empty() {
      return Err(ExtractionError::InvalidInput(format!(
        "'{}' is empty",
        file_name
      )));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || Self::extract_blocking(&bytes))
      .await
      .map_err(|e| ExtractionError::Unreadable(format!("extraction task failed: {}", e)))??;

    tracing::debug!(file_name, size, chars = text.len(), "Extracted text");
    Ok(text)
  }
}
