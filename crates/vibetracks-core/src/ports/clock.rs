/// Source of `added_at` timestamps.
pub trait Clock: Send + Sync {
  /// Milliseconds since the Unix epoch.
  fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_millis(&self) -> i64 {
    chrono::Utc::now().timestamp_millis()
  }
}
