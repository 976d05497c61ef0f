/* src/router/rust/src/page_file/exports.rs */

use serde_json::Value;

use crate::errors::{PlinthError, Result, ensure_usage};
use crate::file_type::FileType;

pub type FileExports = serde_json::Map<String, Value>;

/// Hooks that must be named exports of legacy page files.
const FORBIDDEN_DEFAULT_EXPORTS: &[&str] = &["render", "clientRouting", "prerender", "doNotPrerender"];

/// Check the shape of a freshly loaded module and take its exports.
pub(crate) fn assert_export_values(
  file_path: &str,
  file_type: FileType,
  module: Value,
) -> Result<FileExports> {
  let Value::Object(exports) = module else {
    return Err(PlinthError::internal(format!("exports of {file_path} should be an object")));
  };
  let is_legacy = matches!(
    file_type,
    FileType::Page | FileType::PageServer | FileType::PageClient | FileType::PageRoute
  );
  if is_legacy && let Some(Value::Object(default_export)) = exports.get("default") {
    for name in FORBIDDEN_DEFAULT_EXPORTS {
      ensure_usage(!default_export.contains_key(*name), || {
        format!(
          "{file_path} has `export default {{ {name} }}` which is prohibited, use `export {{ {name} }}` instead."
        )
      })?;
    }
  }
  Ok(exports)
}

/// Read the `exportNames` list the bundler plugin attaches to export-names modules.
pub(crate) fn parse_export_names(file_path: &str, module: &Value) -> Result<Vec<String>> {
  let Some(module) = module.as_object() else {
    return Err(PlinthError::internal(format!("export names module of {file_path} should be an object")));
  };
  let Some(names) = module.get("exportNames") else {
    return Err(PlinthError::usage(format!(
      "{file_path} has no `exportNames`: you seem to be using a bundler version that is incompatible with this version of plinth"
    )));
  };
  names
    .as_array()
    .and_then(|items| items.iter().map(|n| n.as_str().map(str::to_string)).collect::<Option<Vec<_>>>())
    .ok_or_else(|| PlinthError::internal(format!("`exportNames` of {file_path} should be string[]")))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn exports_must_be_object() {
    let err = assert_export_values("/a.page.js", FileType::Page, json!(["x"])).unwrap_err();
    assert!(err.is_internal());
  }

  #[test]
  fn default_export_with_hook_is_usage_error() {
    let module = json!({ "default": { "render": "fn" } });
    let err = assert_export_values("/a.page.server.js", FileType::PageServer, module).unwrap_err();
    assert!(err.is_usage());
    assert!(err.to_string().contains("export { render }"));
  }

  #[test]
  fn plus_file_default_export_is_fine() {
    let module = json!({ "default": { "render": "fn" } });
    assert!(assert_export_values("/pages/+config.js", FileType::PlusConfig, module).is_ok());
  }

  #[test]
  fn export_names_missing_field() {
    let err = parse_export_names("/a.page.js", &json!({})).unwrap_err();
    assert!(err.is_usage());
    assert!(err.to_string().contains("bundler version"));
  }

  #[test]
  fn export_names_wrong_type() {
    let err = parse_export_names("/a.page.js", &json!({ "exportNames": [1, 2] })).unwrap_err();
    assert!(err.is_internal());
    assert!(err.to_string().contains("/a.page.js"));
  }

  #[test]
  fn export_names_ok() {
    let names = parse_export_names("/a.page.js", &json!({ "exportNames": ["render"] })).unwrap();
    assert_eq!(names, vec!["render".to_string()]);
  }
}
