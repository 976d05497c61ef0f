/* src/router/rust/src/analyze/mod.rs */

mod client_dependency;
mod client_side;
mod legacy;
mod strategy;


use std::sync::Arc;

pub use client_dependency::{AnalysisResult, ClientDependency};
pub use client_side::{ClientSideAnalysis, analyze_client_side, client_entry_file_path};
pub use strategy::{
  AnalysisContext, ConfigStrategy, FileConventionStrategy, PageResolutionStrategy, select_strategy,
};

use crate::config::PageConfig;
use crate::errors::Result;
use crate::page_file::PageFile;
use crate::session::SessionOptions;

/// Compute the client entries and dependencies of one page.
pub async fn analyze_page(
  page_files_all: &[Arc<PageFile>],
  page_config: Option<&PageConfig>,
  page_id: &str,
  options: &SessionOptions,
) -> Result<AnalysisResult> {
  let strategy = select_strategy(page_config);
  let result = strategy.analyze(AnalysisContext { page_files_all, page_id, options }).await?;
  tracing::debug!(
    page_id,
    strategy = strategy.kind(),
    html_only = result.is_html_only,
    entries = result.client_entries.len(),
    dependencies = result.client_dependencies.len(),
    "analyzed page"
  );
  Ok(result)
}
