pub mod ai;
pub mod clock;

pub use ai::{AiError, ArtService, InsightService, SuggestionService};
pub use clock::{Clock, SystemClock};
