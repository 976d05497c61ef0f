/* src/router/rust/src/glob/parse.rs */

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::raw::{GlobMap, GlobValue, RawGlobResults};
use crate::config::{
  PageConfig, PageConfigGlobal, merge_global, merge_page_configs, parse_config_global,
  parse_config_layers,
};
use crate::errors::{PlinthError, Result, ensure_internal};
use crate::file_type::{FileType, classify};
use crate::page_file::{LoadModuleFn, PageFile, assert_export_values, parse_export_names};

const RESTART_HINT: &str = "plinth was re-installed(/re-built). Restart your app.";

#[derive(Debug)]
pub struct ParsedGlobResults {
  pub page_files: Vec<Arc<PageFile>>,
  pub page_configs: Vec<PageConfig>,
  pub page_config_global: PageConfigGlobal,
}

/// Registry keyed by path: one shared `PageFile` per path, in first-seen order.
#[derive(Default)]
struct PageFileMap {
  files: Vec<Arc<PageFile>>,
  index: HashMap<String, usize>,
}

impl PageFileMap {
  fn get_or_insert(&mut self, file_path: &str) -> Result<Arc<PageFile>> {
    if let Some(&i) = self.index.get(file_path) {
      return Ok(self.files[i].clone());
    }
    let file = Arc::new(PageFile::new(file_path)?);
    self.index.insert(file_path.to_string(), self.files.len());
    self.files.push(file.clone());
    Ok(file)
  }
}

fn require<T>(field: Option<T>, name: &str) -> Result<T> {
  field.ok_or_else(|| {
    PlinthError::internal(format!("generated glob artifact is missing `{name}`. {RESTART_HINT}"))
  })
}

/// Flatten one glob map into (path, value) pairs, checking that every file
/// type is known and every path really is of the type it is listed under.
fn glob_entries<'a>(field: &str, map: &'a GlobMap) -> Result<Vec<(&'a str, &'a GlobValue)>> {
  let mut entries = Vec::new();
  for (tag, files) in map {
    let Some(file_type) = FileType::from_tag(tag) else {
      return Err(PlinthError::internal(format!("`{field}` has an unknown file type `{tag}`")));
    };
    for (file_path, value) in files {
      let actual = classify(file_path)?;
      ensure_internal(actual == file_type, || {
        format!("`{field}[\"{tag}\"]` lists {file_path} which is a `{actual}` file")
      })?;
      entries.push((file_path.as_str(), value));
    }
  }
  Ok(entries)
}

fn expect_loader<'a>(field: &str, file_path: &str, value: &'a GlobValue) -> Result<&'a LoadModuleFn> {
  match value {
    GlobValue::Loader(loader) => Ok(loader),
    GlobValue::Exports(_) => {
      Err(PlinthError::internal(format!("`{field}` entry {file_path} should be a loader")))
    }
  }
}

fn expect_exports<'a>(field: &str, file_path: &str, value: &'a GlobValue) -> Result<&'a Value> {
  match value {
    GlobValue::Exports(exports) => Ok(exports),
    GlobValue::Loader(_) => {
      Err(PlinthError::internal(format!("`{field}` entry {file_path} should be module exports")))
    }
  }
}

/// Turn the generated glob artifact into the page file registry plus the
/// merged page configs. Any malformed field aborts the whole parse: a partial
/// registry would silently resolve pages wrongly.
pub fn parse_glob_results(raw: RawGlobResults) -> Result<ParsedGlobResults> {
  let RawGlobResults {
    is_generated_file,
    page_files_lazy,
    page_files_eager,
    page_files_export_names_lazy,
    page_files_export_names_eager,
    page_files_list,
    page_configs,
    page_config_global,
  } = raw;

  match require(is_generated_file, "isGeneratedFile")? {
    Value::Bool(true) => {}
    Value::Bool(false) => return Err(PlinthError::internal(RESTART_HINT)),
    other => return Err(PlinthError::internal(format!("`isGeneratedFile === {other}`"))),
  }
  let lazy = require(page_files_lazy, "pageFilesLazy")?;
  let eager = require(page_files_eager, "pageFilesEager")?;
  let export_names_lazy = require(page_files_export_names_lazy, "pageFilesExportNamesLazy")?;
  let export_names_eager = require(page_files_export_names_eager, "pageFilesExportNamesEager")?;
  ensure_internal(lazy.contains_key(FileType::Page.tag()), || {
    "`pageFilesLazy` should have a `.page` entry".to_string()
  })?;
  ensure_internal(
    lazy.contains_key(FileType::PageClient.tag()) || lazy.contains_key(FileType::PageServer.tag()),
    || "`pageFilesLazy` should have a `.page.client` or `.page.server` entry".to_string(),
  )?;
  let page_files_list = require(page_files_list, "pageFilesList")?;

  let layers = parse_config_layers(require(page_configs, "pageConfigs")?)?;
  let raw_global = parse_config_global(require(page_config_global, "pageConfigGlobal")?)?;
  let page_configs = merge_page_configs(&layers)?;
  let page_config_global = merge_global(&raw_global, &layers)?;

  let mut registry = PageFileMap::default();

  for (file_path, value) in glob_entries("pageFilesLazy", &lazy)? {
    let loader = expect_loader("pageFilesLazy", file_path, value)?;
    registry.get_or_insert(file_path)?.attach_module_loader(loader.clone());
  }
  for (file_path, value) in glob_entries("pageFilesExportNamesLazy", &export_names_lazy)? {
    let loader = expect_loader("pageFilesExportNamesLazy", file_path, value)?;
    registry.get_or_insert(file_path)?.attach_export_names_loader(loader.clone());
  }
  // eager entries hold `.page.route` files: exports are available right away
  for (file_path, value) in glob_entries("pageFilesEager", &eager)? {
    let module = expect_exports("pageFilesEager", file_path, value)?;
    let file = registry.get_or_insert(file_path)?;
    let exports = assert_export_values(file_path, file.file_type(), module.clone())?;
    file.set_file_exports(exports);
  }
  for (file_path, value) in glob_entries("pageFilesExportNamesEager", &export_names_eager)? {
    let module = expect_exports("pageFilesExportNamesEager", file_path, value)?;
    ensure_internal(module.is_object(), || {
      format!("`pageFilesExportNamesEager` entry {file_path} should be an object")
    })?;
    let names = parse_export_names(file_path, module).map_err(|e| match e {
      // eager export names are produced by our own generator
      PlinthError::Usage(msg) => PlinthError::Internal(msg),
      other => other,
    })?;
    registry.get_or_insert(file_path)?.set_export_names(names);
  }

  for file_path in &page_files_list {
    registry.get_or_insert(file_path)?;
  }

  let page_files = registry.files;
  for file in &page_files {
    ensure_internal(!file.file_path().contains('\\'), || {
      format!("page file path should use `/` separators: {}", file.file_path())
    })?;
  }

  tracing::debug!(
    page_files = page_files.len(),
    page_configs = page_configs.len(),
    "parsed glob results"
  );
  Ok(ParsedGlobResults { page_files, page_configs, page_config_global })
}
