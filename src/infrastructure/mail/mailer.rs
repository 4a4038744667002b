use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
  #[error("Mail provider rejected the message ({0}): {1}")]
  Rejected(u16, String),

  #[error("Mail transport error: {0}")]
  Transport(#[from] reqwest::Error),
}

/// A rendered HTML email ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
  pub from: String,
  pub to: String,
  pub subject: String,
  pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct ResendPayload<'a> {
  from: &'a str,
  to: [&'a str; 1],
  subject: &'a str,
  html: &'a str,
}

/// Sends mail through the Resend HTTP API
pub struct ResendMailer {
  client: Client,
  api_url: String,
  api_key: String,
}

impl ResendMailer {
  pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_url: api_url.into(),
      api_key: api_key.into(),
    }
  }
}

#[async_trait]
impl Mailer for ResendMailer {
  async fn send(&self, message: MailMessage) -> Result<(), MailError> {
    let payload = ResendPayload {
      from: &message.from,
      to: [&message.to],
      subject: &message.subject,
      html: &message.html,
    };

    let response = self
      .client
      .post(&self.api_url)
      .bearer_auth(&self.api_key)
      .json(&payload)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(MailError::Rejected(status, body));
    }

    tracing::debug!(to = %message.to, subject = %message.subject, "Email accepted by provider");
    Ok(())
  }
}

/// Development mailer: writes the message to the log instead of sending it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
  async fn send(&self, message: MailMessage) -> Result<(), MailError> {
    tracing::info!(
      from = %message.from,
      to = %message.to,
      subject = %message.subject,
      "Mail API key not configured, email not sent"
    );
    tracing::debug!(html = %message.html, "Email body");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resend_payload_shape() {
    let payload = ResendPayload {
      from: "PDFocus <suporte@pdfocus.com.br>",
      to: ["aluno@example.com"],
      subject: "Olá",
      html: "<p>oi</p>",
    };

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "from": "PDFocus <suporte@pdfocus.com.br>",
        "to": ["aluno@example.com"],
        "subject": "Olá",
        "html": "<p>oi</p>",
      })
    );
  }

  #[tokio::test]
  async fn test_log_mailer_always_succeeds() {
    let message = MailMessage {
      from: "a@example.com".into(),
      to: "b@example.com".into(),
      subject: "assunto".into(),
      html: "<p></p>".into(),
    };
    assert!(LogMailer.send(message).await.is_ok());
  }
}
