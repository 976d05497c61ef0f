/* src/router/rust/src/page_file/mod.rs */

// One descriptor per discovered page file, shared by reference across the
// registry. Module loads are memoised behind single-flight load cells.

mod exports;
mod load_cell;


use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::config::is_inherited;
use crate::errors::{PlinthError, Result};
use crate::file_type::{FileType, classify};

pub use exports::FileExports;
pub(crate) use exports::{assert_export_values, parse_export_names};
pub use load_cell::BoxFuture;
use load_cell::LoadCell;

/// Deferred module import supplied by the bundler collaborator.
pub type LoadModuleFn = Arc<dyn Fn() -> BoxFuture<Result<Value>> + Send + Sync>;

/// Where a legacy page file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFileEnv {
  ClientOnly,
  ServerOnly,
  ClientAndServer,
}

pub struct PageFile {
  file_path: String,
  file_type: FileType,
  page_id: String,
  is_default_page_file: bool,
  is_renderer_page_file: bool,
  is_error_page_file: bool,
  module_loader: Mutex<Option<LoadModuleFn>>,
  export_names_loader: Mutex<Option<LoadModuleFn>>,
  exports: LoadCell<Arc<FileExports>>,
  export_names: LoadCell<Arc<Vec<String>>>,
}

impl PageFile {
  pub fn new(file_path: impl Into<String>) -> Result<Self> {
    let file_path = file_path.into();
    let file_type = classify(&file_path)?;
    let is_error_page_file = file_path.contains("/_error");
    let is_default_page_file = !is_error_page_file && file_path.contains("/_default");
    let is_renderer_page_file =
      file_type != FileType::Css && is_default_page_file && is_renderer_path(&file_path);
    Ok(Self {
      page_id: legacy_page_id(&file_path),
      file_path,
      file_type,
      is_default_page_file,
      is_renderer_page_file,
      is_error_page_file,
      module_loader: Mutex::new(None),
      export_names_loader: Mutex::new(None),
      exports: LoadCell::new(),
      export_names: LoadCell::new(),
    })
  }

  pub fn file_path(&self) -> &str {
    &self.file_path
  }

  pub fn file_type(&self) -> FileType {
    self.file_type
  }

  /// Page id under the file-convention design: the path up to the last `.page.`.
  pub fn page_id(&self) -> &str {
    &self.page_id
  }

  pub fn is_default_page_file(&self) -> bool {
    self.is_default_page_file
  }

  pub fn is_renderer_page_file(&self) -> bool {
    self.is_renderer_page_file
  }

  pub fn is_error_page_file(&self) -> bool {
    self.is_error_page_file
  }

  pub fn is_env(&self, env: PageFileEnv) -> bool {
    match env {
      PageFileEnv::ClientOnly => matches!(self.file_type, FileType::PageClient | FileType::Css),
      PageFileEnv::ServerOnly => self.file_type == FileType::PageServer,
      PageFileEnv::ClientAndServer => self.file_type == FileType::Page,
    }
  }

  /// Whether this file takes part in rendering `page_id`: its own files, the
  /// global renderer files, and `_default` files of ancestor directories.
  pub fn is_relevant(&self, page_id: &str) -> bool {
    if self.page_id == page_id {
      return true;
    }
    self.is_default_page_file
      && (is_renderer_path(&self.file_path) || is_ancestor_default_page(page_id, &self.file_path))
  }

  pub fn has_module_loader(&self) -> bool {
    self.module_loader.lock().is_some()
  }

  pub fn has_export_names_loader(&self) -> bool {
    self.export_names_loader.lock().is_some()
  }

  pub fn file_exports(&self) -> Option<Arc<FileExports>> {
    self.exports.get()
  }

  pub fn export_names(&self) -> Option<Arc<Vec<String>>> {
    self.export_names.get()
  }

  pub fn has_export(&self, name: &str) -> bool {
    self.export_names().is_some_and(|names| names.iter().any(|n| n == name))
  }

  pub fn is_loading(&self) -> bool {
    self.exports.is_loading() || self.export_names.is_loading()
  }

  /// Load the full module exports. The underlying loader runs at most once:
  /// concurrent callers share the in-flight load and later calls hit the cache.
  pub async fn load_file(&self) -> Result<Arc<FileExports>> {
    if let Some(exports) = self.exports.get() {
      return Ok(exports);
    }
    let Some(loader) = self.module_loader.lock().clone() else {
      return Err(PlinthError::internal(format!("{} has no module loader", self.file_path)));
    };
    let file_path = self.file_path.clone();
    let file_type = self.file_type;
    self
      .exports
      .get_or_load(move || {
        Box::pin(async move {
          tracing::trace!(file = %file_path, "loading page file exports");
          let module = loader().await?;
          assert_export_values(&file_path, file_type, module).map(Arc::new)
        })
      })
      .await
  }

  /// Load only the export names, which is cheaper than a full module load.
  pub async fn load_export_names(&self) -> Result<Arc<Vec<String>>> {
    if let Some(names) = self.export_names.get() {
      return Ok(names);
    }
    let Some(loader) = self.export_names_loader.lock().clone() else {
      return Err(PlinthError::internal(format!("{} has no export names loader", self.file_path)));
    };
    let file_path = self.file_path.clone();
    self
      .export_names
      .get_or_load(move || {
        Box::pin(async move {
          tracing::trace!(file = %file_path, "loading page file export names");
          let module = loader().await?;
          parse_export_names(&file_path, &module).map(Arc::new)
        })
      })
      .await
  }

  pub(crate) fn attach_module_loader(&self, loader: LoadModuleFn) {
    *self.module_loader.lock() = Some(loader);
  }

  pub(crate) fn attach_export_names_loader(&self, loader: LoadModuleFn) {
    *self.export_names_loader.lock() = Some(loader);
  }

  pub(crate) fn set_file_exports(&self, exports: FileExports) {
    self.exports.set(Arc::new(exports));
  }

  pub(crate) fn set_export_names(&self, names: Vec<String>) {
    self.export_names.set(Arc::new(names));
  }
}

impl fmt::Debug for PageFile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PageFile")
      .field("file_path", &self.file_path)
      .field("file_type", &self.file_type)
      .field("page_id", &self.page_id)
      .field("exports_loaded", &self.exports.get().is_some())
      .field("export_names_loaded", &self.export_names.get().is_some())
      .finish_non_exhaustive()
  }
}

/// `/pages/index` for `/pages/index.page.client.js`; empty when there is no `.page.` suffix.
pub fn legacy_page_id(file_path: &str) -> String {
  file_path.rsplit_once(".page.").map(|(id, _)| id.to_string()).unwrap_or_default()
}

fn is_renderer_path(file_path: &str) -> bool {
  file_path.contains("/renderer/")
}

/// Whether the `_default` file at `default_file_path` sits in `page_id`'s
/// directory or one of its ancestors.
pub(crate) fn is_ancestor_default_page(page_id: &str, default_file_path: &str) -> bool {
  let mut segments: Vec<&str> = default_file_path.split('/').collect();
  segments.pop();
  let dir = segments.into_iter().filter(|s| *s != "_default").collect::<Vec<_>>().join("/");
  let location = if dir.is_empty() { "/" } else { dir.as_str() };
  is_inherited(location, page_id)
}
