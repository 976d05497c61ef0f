/* src/router/rust/src/analyze/client_side.rs */

use crate::config::{BundleSide, PageConfig};
use crate::file_type::{FileType, classify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSideAnalysis {
  pub is_client_side_renderable: bool,
  pub is_client_routing: bool,
}

/// Decide from the merged config alone whether the page runs any code in the
/// browser and whether navigation is handled client-side.
pub fn analyze_client_side(page_config: &PageConfig) -> ClientSideAnalysis {
  let is_client_routing = page_config.bool_value("clientRouting").unwrap_or(false);
  let page_on_client =
    page_config.get("Page").is_some_and(|page| page.env.is_loaded_on(BundleSide::Client));
  let is_client_side_renderable =
    page_on_client && page_config.is_set("Page") && page_config.is_set("onRenderClient");
  ClientSideAnalysis { is_client_side_renderable, is_client_routing }
}

/// The page's own `client` file, if it declares one.
pub fn client_entry_file_path(page_config: &PageConfig) -> Option<&str> {
  page_config.string_value("client")
}

/// Files holding routing-eager values that the client router must import up
/// front. Values written inline in a `+config` file travel in the config
/// values module instead.
pub(super) fn eager_routing_imports(page_config: &PageConfig) -> Vec<&str> {
  page_config
    .values_for(BundleSide::Client)
    .filter(|(_, v)| v.env.is_eager())
    .map(|(_, v)| v.defined_at.file_path.as_str())
    .filter(|file_path| matches!(classify(file_path), Ok(FileType::PlusFile)))
    .collect()
}
