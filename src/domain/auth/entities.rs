use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-day usage counter for a metered feature.
///
/// The counter belongs to `last_date`; any other day starts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyUsage {
  pub count: i32,
  pub last_date: Option<NaiveDate>,
}

impl DailyUsage {
  pub fn new(count: i32, last_date: Option<NaiveDate>) -> Self {
    Self { count, last_date }
  }

  /// Resets the counter when the stored day is not `today`.
  /// Returns true when a reset happened.
  pub fn roll_over(&mut self, today: NaiveDate) -> bool {
    if self.last_date == Some(today) {
      return false;
    }
    self.count = 0;
    self.last_date = Some(today);
    true
  }

  /// Usage counted for `today`, without mutating
  pub fn used_on(&self, today: NaiveDate) -> i32 {
    if self.last_date == Some(today) {
      self.count
    } else {
      0
    }
  }

  pub fn has_capacity(&self, today: NaiveDate, limit: u32) -> bool {
    i64::from(self.used_on(today)) < i64::from(limit)
  }

  pub fn record(&mut self, today: NaiveDate) {
    self.roll_over(today);
    self.count += 1;
  }

  /// Gives back one use counted for `today`. Other days are left alone.
  pub fn release(&mut self, today: NaiveDate) {
    if self.last_date == Some(today) && self.count > 0 {
      self.count -= 1;
    }
  }
}

/// Metered features with their own daily counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
  Summary,
  Feedback,
}

/// User entity representing a registered student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  /// Unique, lower-case
  pub email: String,
  /// Argon2id PHC string
  pub password_hash: String,
  /// False until the email address is confirmed
  pub is_enabled: bool,
  pub summary_usage: DailyUsage,
  pub feedback_usage: DailyUsage,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new, not yet confirmed user
  pub fn new(name: String, email: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
      is_enabled: false,
      summary_usage: DailyUsage::new(0, Some(now.date_naive())),
      feedback_usage: DailyUsage::default(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Marks the account as confirmed
  pub fn enable(&mut self) {
    self.is_enabled = true;
    self.updated_at = Utc::now();
  }

  pub fn touch(&mut self) {
    self.updated_at = Utc::now();
  }

  pub fn usage(&self, kind: UsageKind) -> &DailyUsage {
    match kind {
      UsageKind::Summary => &self.summary_usage,
      UsageKind::Feedback => &self.feedback_usage,
    }
  }

  fn usage_mut(&mut self, kind: UsageKind) -> &mut DailyUsage {
    match kind {
      UsageKind::Summary => &mut self.summary_usage,
      UsageKind::Feedback => &mut self.feedback_usage,
    }
  }

  /// Counts one use of `kind` for `today`, or returns false when the daily
  /// limit is already used up
  pub fn try_consume(&mut self, kind: UsageKind, today: NaiveDate, limit: u32) -> bool {
    let usage = self.usage_mut(kind);
    usage.roll_over(today);
    if !usage.has_capacity(today, limit) {
      return false;
    }
    usage.record(today);
    true
  }

  pub fn release(&mut self, kind: UsageKind, today: NaiveDate) {
    self.usage_mut(kind).release(today);
  }
}

/// Email confirmation token issued at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationToken {
  pub id: Uuid,
  pub user_id: Uuid,
  /// SHA-256 of the secret sent by email
  pub token_hash: String,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
}

impl ConfirmationToken {
  pub fn new(user_id: Uuid, token_hash: String, ttl: Duration) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      created_at: now,
      expires_at: now + ttl,
      confirmed_at: None,
    }
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }

  pub fn is_confirmed(&self) -> bool {
    self.confirmed_at.is_some()
  }

  pub fn confirm(&mut self, now: DateTime<Utc>) {
    self.confirmed_at = Some(now);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
  }

  #[test]
  fn test_new_user_is_disabled_with_fresh_counters() {
    let user = User::new(
      "Maria".to_string(),
      "maria@example.com".to_string(),
      "hash".to_string(),
    );

    assert!(!user.is_enabled);
    assert_eq!(user.summary_usage.count, 0);
    assert_eq!(user.feedback_usage.count, 0);
    assert!(user.feedback_usage.last_date.is_none());
  }

  #[test]
  fn test_enable_user() {
    let mut user = User::new("Ana".into(), "ana@example.com".into(), "hash".into());
    user.enable();
    assert!(user.is_enabled);
  }

  #[test]
  fn test_daily_usage_rolls_over_on_new_day() {
    let mut usage = DailyUsage::new(3, Some(day(1)));

    assert!(!usage.has_capacity(day(1), 3));
    assert!(usage.has_capacity(day(2), 3));

    assert!(usage.roll_over(day(2)));
    assert_eq!(usage.count, 0);
    assert_eq!(usage.last_date, Some(day(2)));

    assert!(!usage.roll_over(day(2)));
  }

  #[test]
  fn test_daily_usage_record_counts_per_day() {
    let mut usage = DailyUsage::default();

    usage.record(day(5));
    usage.record(day(5));
    assert_eq!(usage.used_on(day(5)), 2);
    assert!(!usage.has_capacity(day(5), 2));

    usage.record(day(6));
    assert_eq!(usage.used_on(day(6)), 1);
    assert_eq!(usage.used_on(day(5)), 0);
  }

  #[test]
  fn test_zero_limit_never_has_capacity() {
    let usage = DailyUsage::default();
    assert!(!usage.has_capacity(day(1), 0));
  }

  #[test]
  fn test_try_consume_summary_respects_limit() {
    let mut user = User::new("Ana".into(), "ana@example.com".into(), "hash".into());

    assert!(user.try_consume(UsageKind::Summary, day(1), 2));
    assert!(user.try_consume(UsageKind::Summary, day(1), 2));
    assert!(!user.try_consume(UsageKind::Summary, day(1), 2));
    assert_eq!(user.summary_usage.count, 2);

    assert!(user.try_consume(UsageKind::Summary, day(2), 2));
    assert_eq!(user.summary_usage.count, 1);
    assert_eq!(user.feedback_usage.count, 0);
  }

  #[test]
  fn test_release_only_gives_back_todays_use() {
    let mut user = User::new("Ana".into(), "ana@example.com".into(), "hash".into());
    assert!(user.try_consume(UsageKind::Feedback, day(4), 2));

    user.release(UsageKind::Feedback, day(3));
    assert_eq!(user.feedback_usage.count, 1);

    user.release(UsageKind::Feedback, day(4));
    user.release(UsageKind::Feedback, day(4));
    assert_eq!(user.feedback_usage, DailyUsage::new(0, Some(day(4))));
  }

  #[test]
  fn test_confirmation_token_lifecycle() {
    let mut token = ConfirmationToken::new(Uuid::new_v4(), "h".repeat(64), Duration::minutes(15));

    assert!(!token.is_expired_at(Utc::now()));
    assert!(token.is_expired_at(Utc::now() + Duration::minutes(16)));
    assert!(!token.is_confirmed());

    token.confirm(Utc::now());
    assert!(token.is_confirmed());
  }
}
