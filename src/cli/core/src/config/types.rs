/* src/cli/core/src/config/types.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use plinth_router::SessionOptions;
use plinth_router::session::{DEFAULT_CLIENT_ROUTING_ENTRY, DEFAULT_SERVER_ROUTING_ENTRY};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlinthConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub runtime: RuntimeSection,
  #[serde(default)]
  pub entries: EntriesSection,
  #[serde(default)]
  pub redirects: BTreeMap<String, String>,
  #[serde(default)]
  pub modules: ModulesSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSection {
  #[serde(default)]
  pub production: bool,
  /// Print the page files each side loads when analyzing.
  #[serde(default)]
  pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntriesSection {
  #[serde(default = "default_client_routing")]
  pub client_routing: String,
  #[serde(default = "default_server_routing")]
  pub server_routing: String,
}

impl Default for EntriesSection {
  fn default() -> Self {
    Self { client_routing: default_client_routing(), server_routing: default_server_routing() }
  }
}

fn default_client_routing() -> String {
  DEFAULT_CLIENT_ROUTING_ENTRY.to_string()
}

fn default_server_routing() -> String {
  DEFAULT_SERVER_ROUTING_ENTRY.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModulesSection {
  /// Root that lazy module specifiers of the artifact resolve against.
  #[serde(default = "default_modules_dir")]
  pub dir: String,
  /// The generated glob artifact.
  #[serde(default = "default_artifact")]
  pub artifact: String,
}

impl Default for ModulesSection {
  fn default() -> Self {
    Self { dir: default_modules_dir(), artifact: default_artifact() }
  }
}

fn default_modules_dir() -> String {
  ".plinth/modules".to_string()
}

fn default_artifact() -> String {
  ".plinth/glob.json".to_string()
}

impl PlinthConfig {
  pub fn validate(&self) -> Result<()> {
    if self.entries.client_routing.trim().is_empty() {
      bail!("entries.client_routing must not be empty");
    }
    if self.entries.server_routing.trim().is_empty() {
      bail!("entries.server_routing must not be empty");
    }
    for source in self.redirects.keys() {
      if !source.starts_with('/') {
        bail!("redirect source \"{source}\" must start with /");
      }
    }
    Ok(())
  }

  pub fn session_options(&self) -> SessionOptions {
    SessionOptions {
      is_production: self.runtime.production,
      debug: self.runtime.debug,
      client_routing_entry: self.entries.client_routing.clone(),
      server_routing_entry: self.entries.server_routing.clone(),
      redirects: self.redirects.clone(),
    }
  }

  pub fn modules_dir(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.modules.dir)
  }

  pub fn artifact_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.modules.artifact)
  }
}
