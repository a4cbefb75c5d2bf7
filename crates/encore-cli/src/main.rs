//! `encore`: a personal log of concerts and festivals.
//!
//! Reads `encore.toml` (or the path given with `--config`), opens the SQLite
//! store, and runs one subcommand against it.
//!
//! # Usage
//!
//! ```text
//! encore add --date 2023-04-14 --venue Metro --city Chicago --region IL \
//!   --headliner "Big Thief" --opener "Squirrel Flower"
//! encore list --search metro
//! encore artists
//! encore export csv --out ~/Downloads
//! ```

mod app;
mod cli;
mod render;
mod settings;

use anyhow::Context as _;
use app::App;
use clap::Parser;
use cli::Cli;
use encore_export::TableLayout;
use encore_store_sqlite::SqliteStore;
use settings::{Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays clean for views and exports.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(path) = &cli.store {
    settings.store_path = expand_tilde(path);
  }

  if let Some(parent) = settings.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;

  let layout = TableLayout { lines_per_page: settings.export.lines_per_page };
  let mut app = App::new(store, std::io::stdout())
    .with_json(cli.json)
    .with_layout(layout);

  app.run(cli.command).await
}
