/* src/cli/core/src/commands/mod.rs */

mod analyze;
mod routes;


use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use plinth_router::{BuildSession, ModuleHost, RawGlobResults};

use crate::config::PlinthConfig;
use crate::host::FsModuleHost;

pub use analyze::run_analyze;
pub use routes::{run_match, run_routes};

/// Read the generated artifact and load it into a fresh session.
pub async fn load_session(
  config: &PlinthConfig,
  base_dir: &Path,
  artifact: Option<&Path>,
) -> Result<BuildSession> {
  let artifact_path = match artifact {
    Some(path) => path.to_path_buf(),
    None => config.artifact_path(base_dir),
  };
  let content = tokio::fs::read_to_string(&artifact_path)
    .await
    .with_context(|| format!("failed to read {}", artifact_path.display()))?;
  let value: serde_json::Value = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse {}", artifact_path.display()))?;

  let host: Arc<dyn ModuleHost> = Arc::new(FsModuleHost::new(config.modules_dir(base_dir)));
  let raw = RawGlobResults::from_json(&value, &host)
    .with_context(|| format!("failed to decode {}", artifact_path.display()))?;

  let session = BuildSession::new(config.session_options());
  session.load(raw).with_context(|| format!("failed to load {}", artifact_path.display()))?;
  tracing::debug!(artifact = %artifact_path.display(), "session ready");
  Ok(session)
}
