/* src/cli/core/src/main.rs */

mod commands;
mod config;
mod host;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{PlinthConfig, find_plinth_config, load_plinth_config};

#[derive(Parser)]
#[command(name = "plinth", about = "Plinth page routing inspector")]
struct Cli {
  /// Path to plinth.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Generated glob artifact (defaults to modules.artifact)
  #[arg(short, long, global = true)]
  artifact: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List the route of every page
  Routes,
  /// Show the client entries and dependencies of a page
  Analyze {
    /// Page id, e.g. /pages/index
    #[arg(short, long)]
    page: String,
    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
  },
  /// Find the page rendering a URL pathname
  Match {
    /// URL pathname, e.g. /product/42
    pathname: String,
  },
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("PLINTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, PlinthConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_plinth_config(&cwd)?
    }
  };
  let config = load_plinth_config(&path)?;
  Ok((path, config))
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let (config_path, plinth_config) = resolve_config(cli.config)?;
  let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
  let session = commands::load_session(&plinth_config, base_dir, cli.artifact.as_deref()).await?;

  match cli.command {
    Command::Routes => {
      ui::banner("routes", &plinth_config.project.name);
      commands::run_routes(&session).await?;
    }
    Command::Analyze { page, json } => {
      if !json {
        ui::banner("analyze", &plinth_config.project.name);
      }
      commands::run_analyze(&session, &page, json).await?;
    }
    Command::Match { pathname } => {
      commands::run_match(&session, &pathname).await?;
    }
  }
  Ok(())
}
