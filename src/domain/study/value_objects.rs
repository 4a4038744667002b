use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("O nome da disciplina é obrigatório e deve ter no máximo {0} caracteres")]
  InvalidSubjectName(usize),
  #[error("O título do resumo é obrigatório e deve ter no máximo {0} caracteres")]
  InvalidSummaryTitle(usize),
  #[error("O conteúdo do resumo é obrigatório")]
  EmptySummaryContent,
}

// Subject name - required, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectName(String);

impl SubjectName {
  pub const MAX_LENGTH: usize = 100;

  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidSubjectName(Self::MAX_LENGTH));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for SubjectName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Summary title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTitle(String);

impl SummaryTitle {
  pub const MAX_LENGTH: usize = 255;

  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidSummaryTitle(Self::MAX_LENGTH));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// Default title for a summary generated from a material, cut to fit
  pub fn for_material(original_name: &str) -> Self {
    let title: String = format!("Resumo - {}", original_name.trim())
      .chars()
      .take(Self::MAX_LENGTH)
      .collect();
    Self(title.trim_end().to_string())
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Summary body - must contain something besides whitespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryContent(String);

impl SummaryContent {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    if value.trim().is_empty() {
      return Err(ValueObjectError::EmptySummaryContent);
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Optional free text: blank input is stored as absent
pub fn normalize_description(value: Option<String>) -> Option<String> {
  value
    .map(|d| d.trim().to_string())
    .filter(|d| !d.is_empty())
}

/// Size of an uploaded file in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileSize(u64);

impl FileSize {
  const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

  pub fn new(bytes: u64) -> Self {
    Self(bytes)
  }

  pub fn bytes(&self) -> u64 {
    self.0
  }

  /// "512 B", "1.5 KB", "2.0 MB" ...
  pub fn human_readable(&self) -> String {
    if self.0 < 1024 {
      return format!("{} B", self.0);
    }

    // floor(log1024(bytes)), computed on integers
    let mut exp = 0usize;
    let mut remaining = self.0;
    while remaining >= 1024 && exp < Self::UNITS.len() {
      remaining /= 1024;
      exp += 1;
    }

    let value = self.0 as f64 / 1024f64.powi(exp as i32);
    format!("{:.1} {}B", value, Self::UNITS[exp - 1])
  }
}

impl fmt::Display for FileSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.human_readable())
  }
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub size: u32,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 20;
  pub const MAX_SIZE: u32 = 100;

  pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
    Self {
      page: page.unwrap_or(0),
      size: size
        .unwrap_or(Self::DEFAULT_SIZE)
        .clamp(1, Self::MAX_SIZE),
    }
  }

  pub fn limit(&self) -> i64 {
    i64::from(self.size)
  }

  pub fn offset(&self) -> i64 {
    i64::from(self.page) * i64::from(self.size)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(None, None)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_subject_name_trims_and_rejects_blank() {
    assert_eq!(SubjectName::new("  Cálculo I ").unwrap().value(), "Cálculo I");
    assert!(SubjectName::new("   ").is_err());
    assert!(SubjectName::new("x".repeat(101)).is_err());
  }

  #[test]
  fn test_summary_title_for_material() {
    let title = SummaryTitle::for_material("aula-01.pdf");
    assert_eq!(title.value(), "Resumo - aula-01.pdf");

    let long = SummaryTitle::for_material(&"a".repeat(400));
    assert_eq!(long.value().chars().count(), SummaryTitle::MAX_LENGTH);
  }

  #[test]
  fn test_summary_content_requires_text() {
    assert!(SummaryContent::new("conteúdo").is_ok());
    assert_eq!(
      SummaryContent::new(" \n\t "),
      Err(ValueObjectError::EmptySummaryContent)
    );
  }

  #[test]
  fn test_normalize_description() {
    assert_eq!(normalize_description(Some("  ".into())), None);
    assert_eq!(
      normalize_description(Some(" Prova dia 10 ".into())),
      Some("Prova dia 10".to_string())
    );
    assert_eq!(normalize_description(None), None);
  }

  #[test]
  fn test_file_size_human_readable() {
    assert_eq!(FileSize::new(0).human_readable(), "0 B");
    assert_eq!(FileSize::new(1023).human_readable(), "1023 B");
    assert_eq!(FileSize::new(1024).human_readable(), "1.0 KB");
    assert_eq!(FileSize::new(1536).human_readable(), "1.5 KB");
    assert_eq!(FileSize::new(1024 * 1024).human_readable(), "1.0 MB");
    assert_eq!(FileSize::new(5 * 1024 * 1024 * 1024).human_readable(), "5.0 GB");
  }

  #[test]
  fn test_page_request_defaults_and_clamping() {
    let page = PageRequest::default();
    assert_eq!((page.page, page.size), (0, 20));

    let page = PageRequest::new(Some(2), Some(500));
    assert_eq!(page.size, 100);
    assert_eq!(page.offset(), 200);

    assert_eq!(PageRequest::new(None, Some(0)).size, 1);
  }
}
