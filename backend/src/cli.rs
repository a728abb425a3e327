use clap::Parser;

/// Music collection manager with AI insights and cover art.
#[derive(Debug, Parser)]
#[command(name = "vibetracks", version, about)]
pub struct Cli {
  /// Start with an empty collection instead of the demo songs
  #[arg(long)]
  pub no_seed: bool,

  /// Default log filter when RUST_LOG is not set (e.g. "info", "vibetracks_core=debug")
  #[arg(long, default_value = "warn")]
  pub log_level: String,

  /// Seconds to wait for cover art before using the placeholder
  #[arg(long)]
  pub art_timeout_secs: Option<u64>,
}
