use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "request in flight" flag.
///
/// Clones observe the same flag, so the presentation layer can hold a handle
/// and disable conflicting actions while the owner awaits a request.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_set(&self) -> bool {
    self.0.load(Ordering::Acquire)
  }

  /// Raises the flag until the returned guard is dropped.
  ///
  /// Returns `None` if the flag is already raised.
  pub fn try_raise(&self) -> Option<BusyGuard> {
    self
      .0
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| BusyGuard(self.clone()))
  }
}

/// Clears its [`BusyFlag`] on drop, whichever way the guarded work ends.
#[derive(Debug)]
pub struct BusyGuard(BusyFlag);

impl Drop for BusyGuard {
  fn drop(&mut self) {
    self.0.0.store(false, Ordering::Release);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guard_clears_flag_on_drop() {
    let flag = BusyFlag::new();
    let handle = flag.clone();
    {
      let _guard = flag.try_raise().unwrap();
      assert!(handle.is_set());
      assert!(flag.try_raise().is_none());
    }
    assert!(!handle.is_set());
    assert!(flag.try_raise().is_some());
  }
}
