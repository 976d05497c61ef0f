/* src/router/rust/src/session.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analyze::{AnalysisResult, analyze_page};
use crate::config::{PageConfig, PageConfigGlobal};
use crate::errors::{PlinthError, Result};
use crate::glob::{ParsedGlobResults, RawGlobResults, parse_glob_results};
use crate::page_file::PageFile;
use crate::routing::{PageRoute, RouteMatch, page_routes, route_url};

pub const DEFAULT_CLIENT_ROUTING_ENTRY: &str = "@@plinth/dist/client/client-routing-runtime/entry.js";
pub const DEFAULT_SERVER_ROUTING_ENTRY: &str = "@@plinth/dist/client/server-routing-runtime/entry.js";

/// Session-wide settings that every page analysis reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
  pub is_production: bool,
  pub debug: bool,
  pub client_routing_entry: String,
  pub server_routing_entry: String,
  /// Redirects configured outside the page configs, overridden by the `redirects` config.
  pub redirects: BTreeMap<String, String>,
}

impl Default for SessionOptions {
  fn default() -> Self {
    Self {
      is_production: false,
      debug: false,
      client_routing_entry: DEFAULT_CLIENT_ROUTING_ENTRY.to_string(),
      server_routing_entry: DEFAULT_SERVER_ROUTING_ENTRY.to_string(),
      redirects: BTreeMap::new(),
    }
  }
}

impl SessionOptions {
  /// Runtime entry that boots the page in the browser.
  pub fn client_runtime_entry(&self, is_client_routing: bool) -> &str {
    if is_client_routing { &self.client_routing_entry } else { &self.server_routing_entry }
  }
}

/// One loaded generated artifact.
#[derive(Debug)]
pub struct Registry {
  pub page_files: Vec<Arc<PageFile>>,
  pub page_configs: Vec<PageConfig>,
  pub page_config_global: PageConfigGlobal,
  pub redirects: BTreeMap<String, String>,
}

impl Registry {
  pub fn page_config(&self, page_id: &str) -> Option<&PageConfig> {
    self.page_configs.iter().find(|c| c.page_id == page_id)
  }

  fn has_page(&self, page_id: &str) -> bool {
    self.page_config(page_id).is_some() || self.page_files.iter().any(|p| p.page_id() == page_id)
  }
}

/// Owns the options and the registry of one build or dev-server run.
pub struct BuildSession {
  options: SessionOptions,
  registry: RwLock<Option<Arc<Registry>>>,
}

impl BuildSession {
  pub fn new(options: SessionOptions) -> Self {
    Self { options, registry: RwLock::new(None) }
  }

  pub fn options(&self) -> &SessionOptions {
    &self.options
  }

  /// Parse `raw` and swap it in as the current registry. On error the
  /// previous registry stays in place.
  pub fn load(&self, raw: RawGlobResults) -> Result<Arc<Registry>> {
    let ParsedGlobResults { page_files, page_configs, page_config_global } =
      parse_glob_results(raw)?;

    let mut redirects = self.options.redirects.clone();
    for (from, to) in page_config_global.redirects() {
      if let Some(previous) = redirects.insert(from.clone(), to.clone()) {
        if previous != to {
          tracing::warn!(from = %from, previous = %previous, to = %to, "redirect overridden by config");
        }
      }
    }

    let registry = Arc::new(Registry { page_files, page_configs, page_config_global, redirects });
    tracing::debug!(
      page_files = registry.page_files.len(),
      page_configs = registry.page_configs.len(),
      "registry loaded"
    );
    *self.registry.write() = Some(registry.clone());
    Ok(registry)
  }

  pub fn registry(&self) -> Result<Arc<Registry>> {
    self
      .registry
      .read()
      .clone()
      .ok_or_else(|| PlinthError::internal("the generated artifact was not loaded yet"))
  }

  pub async fn analyze_page(&self, page_id: &str) -> Result<AnalysisResult> {
    let registry = self.registry()?;
    if !registry.has_page(page_id) {
      return Err(PlinthError::usage(format!("unknown page `{page_id}`")));
    }
    analyze_page(&registry.page_files, registry.page_config(page_id), page_id, &self.options).await
  }

  pub async fn routes(&self) -> Result<Vec<PageRoute>> {
    let registry = self.registry()?;
    page_routes(&registry.page_files, &registry.page_configs).await
  }

  pub async fn route_url(&self, pathname: &str) -> Result<Option<RouteMatch>> {
    Ok(route_url(&self.routes().await?, pathname))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::*;
  use crate::glob::ModuleHost;
  use crate::page_file::BoxFuture;

  struct NoHost;

  impl ModuleHost for NoHost {
    fn load(&self, specifier: &str) -> BoxFuture<Result<Value>> {
      let specifier = specifier.to_string();
      Box::pin(async move { Err(PlinthError::load(specifier, "not available in tests")) })
    }
  }

  fn artifact() -> RawGlobResults {
    let host: Arc<dyn ModuleHost> = Arc::new(NoHost);
    let value = json!({
      "isGeneratedFile": true,
      "pageFilesLazy": {
        ".page": { "/pages/index.page.js": "pages/index" },
        ".page.server": { "/renderer/_default.page.server.js": "renderer/server" }
      },
      "pageFilesEager": {},
      "pageFilesExportNamesLazy": {},
      "pageFilesExportNamesEager": {
        ".page": { "/pages/index.page.js": { "exportNames": ["Page"] } },
        ".page.server": { "/renderer/_default.page.server.js": { "exportNames": ["render"] } }
      },
      "pageFilesList": [],
      "pageConfigs": [
        {
          "directory": "/renderer",
          "configValues": {
            "redirects": {
              "value": { "/old": "/new", "/legacy": "/" },
              "definedAt": { "filePath": "/renderer/+config.ts" }
            }
          }
        },
        {
          "directory": "/pages/about",
          "configValues": {
            "Page": { "value": "About", "definedAt": { "filePath": "/pages/about/+Page.tsx" } }
          }
        }
      ],
      "pageConfigGlobal": {}
    });
    RawGlobResults::from_json(&value, &host).unwrap()
  }

  #[test]
  fn registry_is_required_before_use() {
    let session = BuildSession::new(SessionOptions::default());
    assert!(session.registry().unwrap_err().is_internal());
  }

  #[test]
  fn config_redirects_override_session_redirects() {
    let mut options = SessionOptions::default();
    options.redirects.insert("/old".to_string(), "/elsewhere".to_string());
    options.redirects.insert("/blog".to_string(), "/news".to_string());
    let session = BuildSession::new(options);
    let registry = session.load(artifact()).unwrap();
    assert_eq!(registry.redirects["/old"], "/new");
    assert_eq!(registry.redirects["/blog"], "/news");
    assert_eq!(registry.redirects["/legacy"], "/");
  }

  #[test]
  fn failed_load_keeps_previous_registry() {
    let session = BuildSession::new(SessionOptions::default());
    session.load(artifact()).unwrap();
    let broken = RawGlobResults { is_generated_file: Some(json!(false)), ..artifact() };
    assert!(session.load(broken).is_err());
    assert_eq!(session.registry().unwrap().page_configs.len(), 1);
  }

  #[tokio::test]
  async fn analyzes_both_page_kinds() {
    let session = BuildSession::new(SessionOptions::default());
    session.load(artifact()).unwrap();

    let about = session.analyze_page("/pages/about").await.unwrap();
    assert!(about.is_html_only);
    assert!(about.client_dependencies.iter().any(|d| d.id.starts_with("virtual:")));

    let index = session.analyze_page("/pages/index").await.unwrap();
    assert!(!index.is_html_only);
    assert_eq!(index.page_files_client_side, ["/pages/index.page.js"]);

    let err = session.analyze_page("/pages/missing").await.unwrap_err();
    assert!(err.is_usage());
  }

  #[tokio::test]
  async fn routes_cover_configs_and_files() {
    let session = BuildSession::new(SessionOptions::default());
    session.load(artifact()).unwrap();
    let routes = session.routes().await.unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(session.route_url("/about").await.unwrap().unwrap().page_id, "/pages/about");
    assert_eq!(session.route_url("/").await.unwrap().unwrap().page_id, "/pages/index");
  }
}
