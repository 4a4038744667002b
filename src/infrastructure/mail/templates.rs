use std::sync::Arc;
use tera::Tera;

pub const CONFIRMATION_TEMPLATE: &str = "confirmation.html.tera";
pub const FEEDBACK_TEMPLATE: &str = "feedback.html.tera";

/// Email templates, compiled into the binary
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
      (
        CONFIRMATION_TEMPLATE,
        include_str!("../../../templates/email/confirmation.html.tera"),
      ),
      (
        FEEDBACK_TEMPLATE,
        include_str!("../../../templates/email/feedback.html.tera"),
      ),
    ])?;
    tera.autoescape_on(vec![".html.tera"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}
