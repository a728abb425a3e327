pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod infrastructure;
pub mod view;

use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vibetracks_ai::{AiConfig, GeminiClient};
use vibetracks_config::{TomlConfigBackend, VibePaths};
use vibetracks_core::domain::song::demo_collection;
use vibetracks_core::ports::{Clock, SystemClock};
use vibetracks_core::services::{CollectionStore, Session};

use crate::app::App;
use crate::cli::Cli;
use crate::config::SessionConfig;
use crate::infrastructure::console::Console;
use crate::infrastructure::interrupts::Interrupts;

/// Concrete session wired to Gemini and the system clock.
type LiveSession = Session<GeminiClient, GeminiClient, GeminiClient, SystemClock>;

pub fn run() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(&cli.log_level)?;

  // --- Configuration ---
  let paths = VibePaths::new().context("resolving config directories")?;
  let backend = TomlConfigBackend::new(paths);
  let session_cfg = SessionConfig::load(&backend).context("loading [session] config")?;
  let ai_cfg = AiConfig::load(&backend).context("loading [ai] config")?;

  let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
  let result = runtime.block_on(async move {
    let session = build_session(&cli, &session_cfg, &ai_cfg)?;
    let mut console = Console::stdio();
    if ai_cfg.api_key().is_none() {
      console.say("No Gemini API key set (GEMINI_API_KEY); AI features will use fallbacks.").await?;
    }

    let mut app = App::new(session, console, Interrupts::ctrl_c());
    app.run().await?;
    info!("Session ended");
    Ok::<_, anyhow::Error>(())
  });
  // A pending stdin read must not hold up exit after Ctrl-C.
  runtime.shutdown_background();
  result
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(default_level))
    .with_context(|| format!("invalid log filter `{default_level}`"))?;

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init()
    .map_err(|err| anyhow!("failed to initialise tracing: {err}"))
}

fn build_session(cli: &Cli, session_cfg: &SessionConfig, ai_cfg: &AiConfig) -> anyhow::Result<LiveSession> {
  let gemini = GeminiClient::new(ai_cfg)?;
  if !gemini.has_api_key() {
    warn!("No Gemini API key configured");
  }

  let clock = SystemClock;
  let songs = if cli.no_seed || !session_cfg.seed_demo_songs { Vec::new() } else { demo_collection(clock.now_millis()) };
  info!(songs = songs.len(), "Starting session");

  let mut options = session_cfg.session_options();
  if let Some(secs) = cli.art_timeout_secs {
    options.art_timeout = Duration::from_secs(secs.max(1));
  }

  Ok(Session::new(CollectionStore::with_songs(songs), gemini.clone(), gemini.clone(), gemini, clock, options))
}
