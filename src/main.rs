// ABOUTME: Entry point for chatline — a terminal chat client for a single chat service.
// ABOUTME: Parses CLI args, loads config, starts logging, and launches the app.

use std::path::PathBuf;

use clap::Parser;

use chatline::app::App;
use chatline::config::Config;
use chatline::logging;

#[derive(Parser, Debug)]
#[command(name = "chatline", version, about = "Terminal chat client")]
struct Cli {
    /// Chat service base URL (overrides config and CHATLINE_BASE_URL).
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a config file instead of ~/.chatline/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the minimal formatter instead of full Markdown.
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    config.apply_base_url_override(cli.url);
    if cli.plain {
        config.display.markdown = false;
    }

    let log_path = logging::init(&config.logging)?;
    tracing::debug!(path = %log_path.display(), "logging initialized");

    App::new(config).run().await
}
