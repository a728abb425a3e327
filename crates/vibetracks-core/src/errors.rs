// crates/vibetracks-core/src/errors.rs
use thiserror::Error;

use crate::domain::SongId;

/// Error generic to the collection core.
///
/// Upper layers (terminal view, tests) map this to user-facing messages
/// or logs. AI failures never surface here: they are recovered where they
/// happen (see `services::orchestrator` and `services::artwork`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  #[error("song not found: {0}")]
  NotFound(SongId),

  #[error("duplicate song id: {0}")]
  DuplicateId(SongId),
}
