mod mailer;
mod notifier;
mod templates;

pub use mailer::{LogMailer, MailError, MailMessage, Mailer, ResendMailer};
pub use notifier::{EmailNotifier, EmailNotifierConfig};
pub use templates::TemplateEngine;
