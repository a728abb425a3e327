pub mod config;
pub mod gemini;
mod prompt;
mod wire;

pub use config::AiConfig;
pub use gemini::GeminiClient;
