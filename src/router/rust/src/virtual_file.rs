/* src/router/rust/src/virtual_file.rs */

//! Ids and contents of the per-page `pageConfigValuesAll` virtual modules.

use serde_json::{Map, Value, json};

use crate::config::{BundleSide, PageConfig};

const ID_PREFIX: &str = "virtual:plinth:pageConfigValuesAll:";
const CLIENT: &str = "client:";
const SERVER: &str = "server:";

/// Id of the module holding `page_id`'s config values. The client variant
/// carries the values loaded in the browser; the server variant is only ever
/// requested by the client bundle to extract its static assets.
pub fn virtual_file_id_page_config_values_all(page_id: &str, is_for_client_side: bool) -> String {
  let side = if is_for_client_side { CLIENT } else { SERVER };
  format!("{ID_PREFIX}{side}{page_id}")
}

/// Inverse of [`virtual_file_id_page_config_values_all`]: `(page_id, is_for_client_side)`.
pub fn parse_virtual_file_id(id: &str) -> Option<(String, bool)> {
  let rest = id.strip_prefix(ID_PREFIX)?;
  if let Some(page_id) = rest.strip_prefix(CLIENT) {
    return Some((page_id.to_string(), true));
  }
  rest.strip_prefix(SERVER).map(|page_id| (page_id.to_string(), false))
}

/// Content of the virtual module for one side: only the values whose env
/// makes them loadable there.
pub fn page_config_values_all(page_config: &PageConfig, side: BundleSide) -> Value {
  let values: Map<String, Value> = page_config
    .values_for(side)
    .map(|(name, config_value)| {
      let entry = json!({
        "value": config_value.value,
        "definedAt": config_value.defined_at,
        "eager": config_value.env.is_eager(),
      });
      (name.clone(), entry)
    })
    .collect();
  json!({ "pageId": page_config.page_id, "configValues": values })
}
