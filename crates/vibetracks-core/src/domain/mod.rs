pub mod genre;
pub mod ids;
pub mod insights;
pub mod song;

pub use genre::{DEFAULT_GENRE, Genre, GenreParseError};
pub use ids::SongId;
pub use insights::{GenreStat, Insights, Suggestion};
pub use song::{DEFAULT_MOOD, DEFAULT_SPOTIFY_URL, PLACEHOLDER_IMAGE_URL, Song, SongPatch};
