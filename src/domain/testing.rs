//! In-memory port implementations for service tests

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::auth::{
  AccessToken, AccessTokenClaims, AccessTokenService, AuthError, ConfirmationToken,
  ConfirmationTokenRepository, Email, TokenGenerator, TokenHash, UsageKind, User, UserRepository,
};
use crate::domain::errors::RepositoryError;
use crate::domain::feedback::{Feedback, FeedbackError, FeedbackRepository, NewFeedback};
use crate::domain::notifications::{AccountConfirmation, NotificationError, Notifier};
use crate::domain::study::{
  ExtractionError, FileStorage, Material, MaterialRepository, PageRequest, RecentMaterial,
  StorageError, StudyError, Subject, SubjectRepository, Summarizer, Summary, SummaryRepository,
  TextExtractor,
};

pub const TEST_SECRET: &str = "q3JXUv0Ue0mP7yZt6bW1xk2lVb9oR8sTcQ4nA5dEf-_";

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  pub fn get(&self, id: Uuid) -> Option<User> {
    self.users.lock().unwrap().get(&id).cloned()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if users.values().any(|u| u.email == user.email) {
      return Err(RepositoryError::DuplicateKey("users_email_key".into()).into());
    }
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.get(id))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.values().find(|u| u.email == email.as_str()).cloned())
  }

  async fn update(&self, mut user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    let stored = users.get(&user.id).ok_or(RepositoryError::NotFound)?;
    user.summary_usage = stored.summary_usage;
    user.feedback_usage = stored.feedback_usage;
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn try_consume_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
    limit: u32,
  ) -> Result<bool, AuthError> {
    let mut users = self.users.lock().unwrap();
    let user = users.get_mut(&user_id).ok_or(RepositoryError::NotFound)?;
    Ok(user.try_consume(kind, today, limit))
  }

  async fn release_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
  ) -> Result<(), AuthError> {
    let mut users = self.users.lock().unwrap();
    let user = users.get_mut(&user_id).ok_or(RepositoryError::NotFound)?;
    user.release(kind, today);
    Ok(())
  }
}

#[derive(Default)]
pub struct InMemoryConfirmationTokenRepository {
  tokens: Mutex<Vec<ConfirmationToken>>,
}

impl InMemoryConfirmationTokenRepository {
  pub fn all(&self) -> Vec<ConfirmationToken> {
    self.tokens.lock().unwrap().clone()
  }

  pub fn expire_all(&self) {
    let past = Utc::now() - Duration::minutes(1);
    for token in self.tokens.lock().unwrap().iter_mut() {
      token.expires_at = past;
    }
  }
}

#[async_trait]
impl ConfirmationTokenRepository for InMemoryConfirmationTokenRepository {
  async fn create(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError> {
    self.tokens.lock().unwrap().push(token.clone());
    Ok(token)
  }

  async fn find_by_hash(&self, hash: &TokenHash) -> Result<Option<ConfirmationToken>, AuthError> {
    let tokens = self.tokens.lock().unwrap();
    Ok(tokens.iter().find(|t| t.token_hash == hash.as_str()).cloned())
  }

  async fn update(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError> {
    let mut tokens = self.tokens.lock().unwrap();
    let slot = tokens
      .iter_mut()
      .find(|t| t.id == token.id)
      .ok_or(RepositoryError::NotFound)?;
    *slot = token.clone();
    Ok(token)
  }
}

pub struct FixedTokenGenerator;

#[async_trait]
impl TokenGenerator for FixedTokenGenerator {
  async fn generate(&self) -> Result<String, AuthError> {
    Ok(TEST_SECRET.to_string())
  }
}

/// Issues `token-{user_id}` strings
pub struct FakeAccessTokens;

impl AccessTokenService for FakeAccessTokens {
  fn issue(&self, user: &User) -> Result<AccessToken, AuthError> {
    Ok(AccessToken {
      token: format!("token-{}", user.id),
      expires_at: Utc::now() + Duration::hours(1),
    })
  }

  fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
    let user_id = token
      .strip_prefix("token-")
      .and_then(|id| Uuid::parse_str(id).ok())
      .ok_or(AuthError::InvalidAccessToken)?;
    Ok(AccessTokenClaims {
      user_id,
      email: String::new(),
    })
  }
}

#[derive(Default)]
pub struct RecordingNotifier {
  confirmations: Mutex<Vec<AccountConfirmation>>,
  feedback_ids: Mutex<Vec<i64>>,
  fail_next: AtomicBool,
}

impl RecordingNotifier {
  pub fn confirmations(&self) -> Vec<AccountConfirmation> {
    self.confirmations.lock().unwrap().clone()
  }

  pub fn feedback_reports(&self) -> Vec<i64> {
    self.feedback_ids.lock().unwrap().clone()
  }

  pub fn fail_next(&self) {
    self.fail_next.store(true, Ordering::SeqCst);
  }

  fn check_failure(&self) -> Result<(), NotificationError> {
    if self.fail_next.swap(false, Ordering::SeqCst) {
      return Err(NotificationError::Delivery("smtp down".into()));
    }
    Ok(())
  }
}

#[async_trait]
impl Notifier for RecordingNotifier {
  async fn send_account_confirmation(
    &self,
    message: AccountConfirmation,
  ) -> Result<(), NotificationError> {
    self.check_failure()?;
    self.confirmations.lock().unwrap().push(message);
    Ok(())
  }

  async fn send_feedback_report(&self, feedback: &Feedback) -> Result<(), NotificationError> {
    self.check_failure()?;
    self.feedback_ids.lock().unwrap().push(feedback.id);
    Ok(())
  }
}

#[derive(Default)]
pub struct InMemorySubjectRepository {
  subjects: Mutex<HashMap<Uuid, Subject>>,
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
  async fn create(&self, subject: Subject) -> Result<Subject, StudyError> {
    self
      .subjects
      .lock()
      .unwrap()
      .insert(subject.id, subject.clone());
    Ok(subject)
  }

  async fn update(&self, subject: Subject) -> Result<Subject, StudyError> {
    self.create(subject).await
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Subject>, StudyError> {
    let subjects = self.subjects.lock().unwrap();
    Ok(subjects.get(&id).filter(|s| s.user_id == user_id).cloned())
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Subject>, StudyError> {
    let subjects = self.subjects.lock().unwrap();
    let mut found: Vec<Subject> = subjects
      .values()
      .filter(|s| s.user_id == user_id)
      .cloned()
      .collect();
    found.sort_by(|a, b| a.name.value().cmp(b.name.value()));
    Ok(found)
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    self.subjects.lock().unwrap().remove(&id);
    Ok(())
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    Ok(self.find_by_user(user_id).await?.len() as i64)
  }
}

#[derive(Default)]
pub struct InMemoryMaterialRepository {
  materials: Mutex<Vec<Material>>,
  fail_next_create: AtomicBool,
}

impl InMemoryMaterialRepository {
  pub fn fail_next_create(&self) {
    self.fail_next_create.store(true, Ordering::SeqCst);
  }

  fn by_user(&self, user_id: Uuid) -> Vec<Material> {
    let mut found: Vec<Material> = self
      .materials
      .lock()
      .unwrap()
      .iter()
      .filter(|m| m.user_id == user_id)
      .cloned()
      .collect();
    found.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    found
  }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
  async fn create(&self, material: Material) -> Result<Material, StudyError> {
    if self.fail_next_create.swap(false, Ordering::SeqCst) {
      return Err(RepositoryError::QueryFailed("insert failed".into()).into());
    }
    self.materials.lock().unwrap().push(material.clone());
    Ok(material)
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Material>, StudyError> {
    Ok(self.by_user(user_id).into_iter().find(|m| m.id == id))
  }

  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Material>, StudyError> {
    Ok(
      self
        .by_user(user_id)
        .into_iter()
        .filter(|m| m.subject_id == subject_id)
        .collect(),
    )
  }

  async fn find_page_by_subject(
    &self,
    subject_id: Uuid,
    page: PageRequest,
  ) -> Result<Vec<Material>, StudyError> {
    let materials = self.materials.lock().unwrap();
    Ok(
      materials
        .iter()
        .filter(|m| m.subject_id == subject_id)
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect(),
    )
  }

  async fn find_recent_by_user(
    &self,
    user_id: Uuid,
    limit: i64,
  ) -> Result<Vec<RecentMaterial>, StudyError> {
    Ok(
      self
        .by_user(user_id)
        .into_iter()
        .take(limit as usize)
        .map(|material| RecentMaterial {
          material,
          subject_name: None,
        })
        .collect(),
    )
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    self.materials.lock().unwrap().retain(|m| m.id != id);
    Ok(())
  }

  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError> {
    let mut materials = self.materials.lock().unwrap();
    let before = materials.len();
    materials.retain(|m| m.subject_id != subject_id);
    Ok((before - materials.len()) as u64)
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    Ok(self.by_user(user_id).len() as i64)
  }
}

#[derive(Default)]
pub struct InMemorySummaryRepository {
  summaries: Mutex<Vec<Summary>>,
  fail_next_create: AtomicBool,
}

impl InMemorySummaryRepository {
  pub fn len(&self) -> usize {
    self.summaries.lock().unwrap().len()
  }

  pub fn fail_next_create(&self) {
    self.fail_next_create.store(true, Ordering::SeqCst);
  }

  fn matching(&self, predicate: impl Fn(&Summary) -> bool) -> Vec<Summary> {
    let mut found: Vec<Summary> = self
      .summaries
      .lock()
      .unwrap()
      .iter()
      .filter(|s| predicate(*s))
      .cloned()
      .collect();
    found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    found
  }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
  async fn create(&self, summary: Summary) -> Result<Summary, StudyError> {
    if self.fail_next_create.swap(false, Ordering::SeqCst) {
      return Err(RepositoryError::QueryFailed("insert failed".into()).into());
    }
    self.summaries.lock().unwrap().push(summary.clone());
    Ok(summary)
  }

  async fn update(&self, summary: Summary) -> Result<Summary, StudyError> {
    let mut summaries = self.summaries.lock().unwrap();
    let slot = summaries
      .iter_mut()
      .find(|s| s.id == summary.id)
      .ok_or(RepositoryError::NotFound)?;
    *slot = summary.clone();
    Ok(summary)
  }

  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Summary>, StudyError> {
    Ok(
      self
        .matching(|s| s.id == id && s.user_id == user_id)
        .into_iter()
        .next(),
    )
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Summary>, StudyError> {
    Ok(self.matching(|s| s.user_id == user_id))
  }

  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Summary>, StudyError> {
    Ok(self.matching(|s| s.subject_id == subject_id && s.user_id == user_id))
  }

  async fn delete(&self, id: Uuid) -> Result<(), StudyError> {
    self.summaries.lock().unwrap().retain(|s| s.id != id);
    Ok(())
  }

  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError> {
    let mut summaries = self.summaries.lock().unwrap();
    let before = summaries.len();
    summaries.retain(|s| s.subject_id != subject_id);
    Ok((before - summaries.len()) as u64)
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError> {
    Ok(self.matching(|s| s.user_id == user_id).len() as i64)
  }
}

#[derive(Default)]
pub struct InMemoryFileStorage {
  files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStorage {
  pub fn contains(&self, storage_name: &str) -> bool {
    self.files.lock().unwrap().contains_key(storage_name)
  }

  pub fn len(&self) -> usize {
    self.files.lock().unwrap().len()
  }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
  async fn store(&self, storage_name: &str, bytes: &[u8]) -> Result<(), StorageError> {
    self
      .files
      .lock()
      .unwrap()
      .insert(storage_name.to_string(), bytes.to_vec());
    Ok(())
  }

  async fn read(&self, storage_name: &str) -> Result<Vec<u8>, StorageError> {
    self
      .files
      .lock()
      .unwrap()
      .get(storage_name)
      .cloned()
      .ok_or_else(|| StorageError::NotFound(storage_name.to_string()))
  }

  async fn delete(&self, storage_name: &str) -> Result<(), StorageError> {
    self
      .files
      .lock()
      .unwrap()
      .remove(storage_name)
      .map(|_| ())
      .ok_or_else(|| StorageError::NotFound(storage_name.to_string()))
  }
}

/// Returns a canned text for any document
pub struct StubTextExtractor {
  text: Mutex<String>,
  calls: AtomicUsize,
}

impl StubTextExtractor {
  pub fn returning(text: &str) -> Self {
    Self {
      text: Mutex::new(text.to_string()),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn set_text(&self, text: &str) {
    *self.text.lock().unwrap() = text.to_string();
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl TextExtractor for StubTextExtractor {
  async fn extract(&self, _bytes: Vec<u8>, _file_name: &str) -> Result<String, ExtractionError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.text.lock().unwrap().clone())
  }
}

/// Blocks inside `extract` until the test opens the gate
#[derive(Default)]
pub struct GatedTextExtractor {
  entered: Notify,
  gate: Notify,
}

impl GatedTextExtractor {
  /// Resolves once an extraction is waiting at the gate
  pub async fn wait_entered(&self) {
    self.entered.notified().await;
  }

  pub fn open(&self) {
    self.gate.notify_one();
  }
}

#[async_trait]
impl TextExtractor for GatedTextExtractor {
  async fn extract(&self, _bytes: Vec<u8>, _file_name: &str) -> Result<String, ExtractionError> {
    self.entered.notify_one();
    self.gate.notified().await;
    Ok("Texto liberado depois da espera pelo portão de teste.".to_string())
  }
}

/// Keeps the first `max_words` words
pub struct WordLimitSummarizer;

impl Summarizer for WordLimitSummarizer {
  fn summarize(&self, text: &str, max_words: usize) -> String {
    text
      .split_whitespace()
      .take(max_words)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
  feedbacks: Mutex<Vec<Feedback>>,
}

impl InMemoryFeedbackRepository {
  pub fn len(&self) -> usize {
    self.feedbacks.lock().unwrap().len()
  }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
  async fn create(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackError> {
    let mut feedbacks = self.feedbacks.lock().unwrap();
    let feedback = Feedback::from_new(feedbacks.len() as i64 + 1, feedback);
    feedbacks.push(feedback.clone());
    Ok(feedback)
  }
}
