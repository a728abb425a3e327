pub mod artwork;
pub mod busy;
pub mod collection;
pub mod derive;
pub mod form;
pub mod orchestrator;
pub mod session;

pub use artwork::{DEFAULT_ART_TIMEOUT, resolve_cover_art};
pub use busy::{BusyFlag, BusyGuard};
pub use collection::CollectionStore;
pub use derive::{SortKey, SortOrder, SortParseError, genre_aggregate, sorted_view};
pub use form::{Draft, FormController, FormError, FormState, SubmitOutcome, ValidationError};
pub use orchestrator::{AutoRefresh, InsightOrchestrator, RoundOutcome, join_settled};
pub use session::{Session, SessionOptions};
