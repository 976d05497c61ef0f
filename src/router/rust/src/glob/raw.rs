/* src/router/rust/src/glob/raw.rs */

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{PlinthError, Result};
use crate::page_file::{BoxFuture, LoadModuleFn};

/// One glob match: either a deferred import or exports that are already available.
#[derive(Clone)]
pub enum GlobValue {
  Loader(LoadModuleFn),
  Exports(Value),
}

impl fmt::Debug for GlobValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Loader(_) => f.write_str("Loader(..)"),
      Self::Exports(value) => f.debug_tuple("Exports").field(value).finish(),
    }
  }
}

/// File path -> glob value.
pub type GlobFiles = BTreeMap<String, GlobValue>;
/// File type tag -> files of that type.
pub type GlobMap = BTreeMap<String, GlobFiles>;

/// The generated glob artifact before validation. A `None` field is a field
/// the artifact did not contain.
#[derive(Debug, Clone, Default)]
pub struct RawGlobResults {
  pub is_generated_file: Option<Value>,
  pub page_files_lazy: Option<GlobMap>,
  pub page_files_eager: Option<GlobMap>,
  pub page_files_export_names_lazy: Option<GlobMap>,
  pub page_files_export_names_eager: Option<GlobMap>,
  pub page_files_list: Option<Vec<String>>,
  pub page_configs: Option<Value>,
  pub page_config_global: Option<Value>,
}

/// Resolves lazy module specifiers of a serialized glob artifact.
pub trait ModuleHost: Send + Sync {
  fn load(&self, specifier: &str) -> BoxFuture<Result<Value>>;
}

impl RawGlobResults {
  /// Decode a serialized artifact. Entries of the lazy maps are module
  /// specifiers handed to `host` on first load; entries of the eager maps are
  /// the module exports themselves. Shape checks beyond JSON decoding are left
  /// to `parse_glob_results`.
  pub fn from_json(value: &Value, host: &Arc<dyn ModuleHost>) -> Result<Self> {
    let Some(obj) = value.as_object() else {
      return Err(PlinthError::internal("glob artifact should be an object"));
    };
    let page_files_list = match obj.get("pageFilesList") {
      None => None,
      Some(list) => Some(
        serde_json::from_value::<Vec<String>>(list.clone())
          .map_err(|_| PlinthError::internal("`pageFilesList` should be string[]"))?,
      ),
    };
    Ok(Self {
      is_generated_file: obj.get("isGeneratedFile").cloned(),
      page_files_lazy: decode_glob_map(obj, "pageFilesLazy", host)?,
      page_files_eager: decode_glob_map(obj, "pageFilesEager", host)?,
      page_files_export_names_lazy: decode_glob_map(obj, "pageFilesExportNamesLazy", host)?,
      page_files_export_names_eager: decode_glob_map(obj, "pageFilesExportNamesEager", host)?,
      page_files_list,
      page_configs: obj.get("pageConfigs").cloned(),
      page_config_global: obj.get("pageConfigGlobal").cloned(),
    })
  }
}

fn decode_glob_map(
  obj: &serde_json::Map<String, Value>,
  field: &str,
  host: &Arc<dyn ModuleHost>,
) -> Result<Option<GlobMap>> {
  let Some(value) = obj.get(field) else {
    return Ok(None);
  };
  let Some(by_type) = value.as_object() else {
    return Err(PlinthError::internal(format!("`{field}` should be an object")));
  };
  let mut map = GlobMap::new();
  for (file_type, files) in by_type {
    let Some(files) = files.as_object() else {
      return Err(PlinthError::internal(format!("`{field}[\"{file_type}\"]` should be an object")));
    };
    let decoded = files
      .iter()
      .map(|(file_path, entry)| {
        let glob_value = match entry {
          Value::String(specifier) => GlobValue::Loader(host_loader(host, specifier)),
          other => GlobValue::Exports(other.clone()),
        };
        (file_path.clone(), glob_value)
      })
      .collect();
    map.insert(file_type.clone(), decoded);
  }
  Ok(Some(map))
}

fn host_loader(host: &Arc<dyn ModuleHost>, specifier: &str) -> LoadModuleFn {
  let host = host.clone();
  let specifier = specifier.to_string();
  Arc::new(move || host.load(&specifier))
}
