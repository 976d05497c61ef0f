/* src/cli/core/src/host.rs */

use std::path::{Path, PathBuf};

use plinth_router::{BoxFuture, ModuleHost, PlinthError};
use serde_json::Value;

/// Serves lazy module specifiers from JSON module snapshots on disk:
/// `pages/index` resolves to `<root>/pages/index.json`.
pub struct FsModuleHost {
  root: PathBuf,
}

impl FsModuleHost {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn resolve(&self, specifier: &str) -> PathBuf {
    let path = self.root.join(specifier.trim_start_matches('/'));
    if path.extension().is_some_and(|ext| ext == "json") { path } else { with_json_ext(&path) }
  }
}

fn with_json_ext(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_owned();
  name.push(".json");
  PathBuf::from(name)
}

impl ModuleHost for FsModuleHost {
  fn load(&self, specifier: &str) -> BoxFuture<plinth_router::Result<Value>> {
    let path = self.resolve(specifier);
    let specifier = specifier.to_string();
    Box::pin(async move {
      tracing::trace!(module = %specifier, path = %path.display(), "reading module snapshot");
      let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PlinthError::load(&specifier, format!("{}: {e}", path.display())))?;
      serde_json::from_str(&content).map_err(|e| PlinthError::load(&specifier, e.to_string()))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn reads_snapshot_next_to_specifier() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("pages")).unwrap();
    std::fs::write(tmp.path().join("pages/index.page.js.json"), r#"{ "exportNames": ["Page"] }"#)
      .unwrap();

    let host = FsModuleHost::new(tmp.path());
    let module = host.load("/pages/index.page.js").await.unwrap();
    assert_eq!(module["exportNames"][0], "Page");
  }

  #[tokio::test]
  async fn missing_snapshot_is_a_load_error() {
    let tmp = tempfile::tempdir().unwrap();
    let host = FsModuleHost::new(tmp.path());
    let err = host.load("pages/missing").await.unwrap_err();
    assert!(matches!(err, PlinthError::Load { ref file_path, .. } if file_path == "pages/missing"));
  }
}
