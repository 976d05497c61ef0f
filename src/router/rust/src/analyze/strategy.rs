/* src/router/rust/src/analyze/strategy.rs */

use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::client_dependency::{AnalysisResult, ClientDependency};
use super::client_side::{analyze_client_side, client_entry_file_path, eager_routing_imports};
use super::legacy;
use crate::config::PageConfig;
use crate::errors::Result;
use crate::page_file::PageFile;
use crate::session::SessionOptions;
use crate::virtual_file::virtual_file_id_page_config_values_all;

pub struct AnalysisContext<'a> {
  pub page_files_all: &'a [Arc<PageFile>],
  pub page_id: &'a str,
  pub options: &'a SessionOptions,
}

/// How a page's client bundle is derived: from a merged config, or from the
/// `.page.*` files that describe it.
pub trait PageResolutionStrategy: Send + Sync {
  fn kind(&self) -> &'static str;

  fn analyze<'a>(&'a self, ctx: AnalysisContext<'a>) -> BoxFuture<'a, Result<AnalysisResult>>;
}

pub struct ConfigStrategy<'c> {
  pub page_config: &'c PageConfig,
}

impl ConfigStrategy<'_> {
  fn resolve(&self, options: &SessionOptions) -> AnalysisResult {
    let page_id = &self.page_config.page_id;
    let analysis = analyze_client_side(self.page_config);

    let mut client_dependencies =
      vec![ClientDependency::code(virtual_file_id_page_config_values_all(page_id, true))];
    if !options.is_production {
      // the dev server serves the CSS of server-only values through the client graph
      client_dependencies
        .push(ClientDependency::assets(virtual_file_id_page_config_values_all(page_id, false)));
    }

    let mut client_entries = Vec::new();
    if analysis.is_client_side_renderable {
      let entry = options.client_runtime_entry(analysis.is_client_routing);
      client_dependencies.push(ClientDependency::code(entry));
      client_entries.push(entry.to_string());
    } else if let Some(client_file) = client_entry_file_path(self.page_config) {
      client_dependencies.push(ClientDependency::assets(client_file));
    }

    // routing-eager files are imported by the client router, which an HTML-only page never boots
    if analysis.is_client_side_renderable && analysis.is_client_routing {
      for file_path in eager_routing_imports(self.page_config) {
        if !client_dependencies.iter().any(|dep| dep.id == file_path) {
          client_dependencies.push(ClientDependency::eager(file_path));
        }
      }
    }

    AnalysisResult {
      is_html_only: client_entries.is_empty(),
      is_client_routing: analysis.is_client_routing,
      client_entries,
      client_dependencies,
      page_files_client_side: Vec::new(),
      page_files_server_side: Vec::new(),
    }
  }
}

impl PageResolutionStrategy for ConfigStrategy<'_> {
  fn kind(&self) -> &'static str {
    "config"
  }

  fn analyze<'a>(&'a self, ctx: AnalysisContext<'a>) -> BoxFuture<'a, Result<AnalysisResult>> {
    Box::pin(async move { Ok(self.resolve(ctx.options)) })
  }
}

pub struct FileConventionStrategy;

impl PageResolutionStrategy for FileConventionStrategy {
  fn kind(&self) -> &'static str {
    "file-convention"
  }

  fn analyze<'a>(&'a self, ctx: AnalysisContext<'a>) -> BoxFuture<'a, Result<AnalysisResult>> {
    Box::pin(legacy::analyze_page_client_side(ctx.page_files_all, ctx.page_id, ctx.options))
  }
}

/// A page with a merged config is always resolved from it; file conventions
/// are the fallback for pages defined only through `.page.*` files.
pub fn select_strategy(page_config: Option<&PageConfig>) -> Box<dyn PageResolutionStrategy + '_> {
  match page_config {
    Some(page_config) => Box::new(ConfigStrategy { page_config }),
    None => Box::new(FileConventionStrategy),
  }
}
