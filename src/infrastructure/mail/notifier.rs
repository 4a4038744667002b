use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use super::mailer::{MailMessage, Mailer};
use super::templates::{CONFIRMATION_TEMPLATE, FEEDBACK_TEMPLATE, TemplateEngine};
use crate::domain::feedback::{Feedback, FeedbackKind};
use crate::domain::notifications::{AccountConfirmation, NotificationError, Notifier};

const CONFIRMATION_SUBJECT: &str = "🚀 Bem-vindo ao PDFocus! Confirme sua conta";
const FEEDBACK_SUBJECT: &str = "📨 Novo Feedback recebido - PDFocus";

const BUG_COLOR: &str = "#E74C3C";
const DEFAULT_COLOR: &str = "#2E86C1";

/// Sender and recipient addresses used by [`EmailNotifier`]
#[derive(Debug, Clone)]
pub struct EmailNotifierConfig {
  pub auth_from: String,
  pub feedback_from: String,
  pub feedback_recipient: String,
}

/// Renders notification emails and hands them to a [`Mailer`]
pub struct EmailNotifier {
  mailer: Arc<dyn Mailer>,
  templates: TemplateEngine,
  config: EmailNotifierConfig,
}

impl EmailNotifier {
  pub fn new(mailer: Arc<dyn Mailer>, templates: TemplateEngine, config: EmailNotifierConfig) -> Self {
    Self {
      mailer,
      templates,
      config,
    }
  }

  fn render(&self, template: &str, context: &tera::Context) -> Result<String, NotificationError> {
    self
      .templates
      .render(template, context)
      .map_err(|e| NotificationError::Render(e.to_string()))
  }

  async fn deliver(&self, message: MailMessage) -> Result<(), NotificationError> {
    self
      .mailer
      .send(message)
      .await
      .map_err(|e| NotificationError::Delivery(e.to_string()))
  }
}

fn feedback_context(feedback: &Feedback) -> tera::Context {
  let color = match feedback.kind {
    FeedbackKind::Bug => BUG_COLOR,
    _ => DEFAULT_COLOR,
  };

  let mut context = tera::Context::new();
  context.insert("color", color);
  context.insert("kind_label", feedback.kind.label());
  context.insert(
    "rating",
    &feedback
      .rating
      .map(|r| format!("{}/5 {}", r.value(), r.stars()))
      .unwrap_or_else(|| "Sem avaliação".to_string()),
  );
  context.insert("message", &feedback.message);
  context.insert(
    "user_email",
    feedback.user_email.as_deref().unwrap_or("Anônimo"),
  );
  context.insert("page", &feedback.page);
  context.insert("user_agent", &feedback.user_agent);
  context.insert(
    "created_at",
    &feedback
      .created_at
      .with_timezone(&Local)
      .format("%d/%m/%Y às %H:%M")
      .to_string(),
  );
  context
}

#[async_trait]
impl Notifier for EmailNotifier {
  async fn send_account_confirmation(
    &self,
    message: AccountConfirmation,
  ) -> Result<(), NotificationError> {
    let mut context = tera::Context::new();
    context.insert("name", &message.name);
    context.insert("confirmation_link", &message.confirmation_link);

    let html = self.render(CONFIRMATION_TEMPLATE, &context)?;

    self
      .deliver(MailMessage {
        from: self.config.auth_from.clone(),
        to: message.email,
        subject: CONFIRMATION_SUBJECT.to_string(),
        html,
      })
      .await
  }

  async fn send_feedback_report(&self, feedback: &Feedback) -> Result<(), NotificationError> {
    tracing::info!(
      feedback_id = feedback.id,
      kind = feedback.kind.as_str(),
      user = feedback.user_email.as_deref().unwrap_or("Anônimo"),
      "Feedback received"
    );

    let html = self.render(FEEDBACK_TEMPLATE, &feedback_context(feedback))?;

    self
      .deliver(MailMessage {
        from: self.config.feedback_from.clone(),
        to: self.config.feedback_recipient.clone(),
        subject: FEEDBACK_SUBJECT.to_string(),
        html,
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::feedback::{NewFeedback, Rating};
  use crate::infrastructure::mail::MailError;
  use chrono::Utc;
  use std::sync::Mutex;

  #[derive(Default)]
  struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
    reject: bool,
  }

  #[async_trait]
  impl Mailer for CapturingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
      if self.reject {
        return Err(MailError::Rejected(422, "invalid from".into()));
      }
      self.sent.lock().unwrap().push(message);
      Ok(())
    }
  }

  fn config() -> EmailNotifierConfig {
    EmailNotifierConfig {
      auth_from: "PDFocus Security <suporte@pdfocus.com.br>".into(),
      feedback_from: "PDFocus <onboarding@resend.dev>".into(),
      feedback_recipient: "equipe@pdfocus.com.br".into(),
    }
  }

  fn notifier(mailer: Arc<CapturingMailer>) -> EmailNotifier {
    EmailNotifier::new(mailer, TemplateEngine::new().unwrap(), config())
  }

  fn feedback(kind: FeedbackKind, rating: Option<u8>, email: Option<&str>) -> Feedback {
    Feedback::from_new(
      7,
      NewFeedback {
        user_id: None,
        kind,
        rating: rating.map(|r| Rating::new(r).unwrap()),
        message: "O upload travou".into(),
        user_email: email.map(str::to_string),
        page: "/disciplinas".into(),
        user_agent: "Firefox".into(),
        created_at: Utc::now(),
      },
    )
  }

  #[tokio::test]
  async fn test_confirmation_email() {
    let mailer = Arc::new(CapturingMailer::default());
    let notifier = notifier(mailer.clone());

    notifier
      .send_account_confirmation(AccountConfirmation {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        confirmation_link: "http://localhost:5173/confirmar-email?token=abc".into(),
      })
      .await
      .unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@example.com");
    assert_eq!(sent[0].from, "PDFocus Security <suporte@pdfocus.com.br>");
    assert_eq!(sent[0].subject, CONFIRMATION_SUBJECT);
    assert!(sent[0].html.contains("Ana"));
    assert!(sent[0].html.contains("token=abc"));
  }

  #[tokio::test]
  async fn test_bug_report_email() {
    let mailer = Arc::new(CapturingMailer::default());
    let notifier = notifier(mailer.clone());

    notifier
      .send_feedback_report(&feedback(FeedbackKind::Bug, Some(2), Some("ana@example.com")))
      .await
      .unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent[0].to, "equipe@pdfocus.com.br");
    assert_eq!(sent[0].subject, FEEDBACK_SUBJECT);
    assert!(sent[0].html.contains(BUG_COLOR));
    // Autoescape renders `/` as `&#x2F;`
    assert!(sent[0].html.contains("🐛 Erro &#x2F; Bug"));
    assert!(sent[0].html.contains("2&#x2F;5 ⭐⭐"));
    assert!(sent[0].html.contains("ana@example.com"));
  }

  #[tokio::test]
  async fn test_anonymous_unrated_feedback_email() {
    let mailer = Arc::new(CapturingMailer::default());
    let notifier = notifier(mailer.clone());

    notifier
      .send_feedback_report(&feedback(FeedbackKind::Suggestion, None, None))
      .await
      .unwrap();

    let html = &mailer.sent.lock().unwrap()[0].html;
    assert!(html.contains(DEFAULT_COLOR));
    assert!(!html.contains(BUG_COLOR));
    assert!(html.contains("Sem avaliação"));
    assert!(html.contains("Anônimo"));
  }

  #[tokio::test]
  async fn test_feedback_page_is_never_a_link() {
    let mailer = Arc::new(CapturingMailer::default());
    let notifier = notifier(mailer.clone());

    let mut report = feedback(FeedbackKind::Other, None, None);
    report.page = "javascript:alert(1)".into();
    notifier.send_feedback_report(&report).await.unwrap();

    let html = &mailer.sent.lock().unwrap()[0].html;
    assert!(html.contains("<code>javascript:alert(1)</code>"));
    assert!(!html.contains("href"));
  }

  #[tokio::test]
  async fn test_delivery_failure_is_reported() {
    let mailer = Arc::new(CapturingMailer {
      reject: true,
      ..Default::default()
    });
    let notifier = notifier(mailer);

    let result = notifier
      .send_feedback_report(&feedback(FeedbackKind::Other, None, None))
      .await;
    assert!(matches!(result, Err(NotificationError::Delivery(_))));
  }
}
