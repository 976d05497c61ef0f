/* src/router/rust/src/analyze/client_dependency.rs */

use serde::Serialize;

/// A module the client bundle of a page depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDependency {
  pub id: String,
  /// Only the static assets (CSS, images) of the module are wanted; its code never runs in the browser.
  pub only_assets: bool,
  /// Imported by the client entry up front instead of behind a lazy import.
  pub eagerly_imported: bool,
}

impl ClientDependency {
  pub fn code(id: impl Into<String>) -> Self {
    Self { id: id.into(), only_assets: false, eagerly_imported: false }
  }

  pub fn assets(id: impl Into<String>) -> Self {
    Self { id: id.into(), only_assets: true, eagerly_imported: false }
  }

  pub fn eager(id: impl Into<String>) -> Self {
    Self { id: id.into(), only_assets: false, eagerly_imported: true }
  }
}

/// Client bundle analysis of one page, consumed by the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
  pub is_html_only: bool,
  pub is_client_routing: bool,
  pub client_entries: Vec<String>,
  pub client_dependencies: Vec<ClientDependency>,
  /// Debugging aid, only filled by the file-convention analyzer.
  pub page_files_client_side: Vec<String>,
  /// Debugging aid, only filled by the file-convention analyzer.
  pub page_files_server_side: Vec<String>,
}
