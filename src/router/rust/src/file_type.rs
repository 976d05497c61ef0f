/* src/router/rust/src/file_type.rs */

//! Naming-convention classification of page files.

use std::fmt;

use crate::errors::{PlinthError, Result};

const SCRIPT_EXTENSIONS: &[&str] =
  &["js", "ts", "jsx", "tsx", "mjs", "cjs", "mts", "cts", "vue", "svelte", "md", "mdx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileType {
  /// `.page.js`: loaded on both server and client
  Page,
  /// `.page.server.js`: server render hook
  PageServer,
  /// `.page.client.js`: client render hook
  PageClient,
  /// `.page.route.js`: route definition
  PageRoute,
  Css,
  /// `+config.js`: directory or global config
  PlusConfig,
  /// `+onRenderHtml.js` and friends: a single config value
  PlusFile,
}

impl FileType {
  pub const ALL: [FileType; 7] = [
    Self::Page,
    Self::PageServer,
    Self::PageClient,
    Self::PageRoute,
    Self::Css,
    Self::PlusConfig,
    Self::PlusFile,
  ];

  /// Key used by the generated glob maps.
  pub fn tag(self) -> &'static str {
    match self {
      Self::Page => ".page",
      Self::PageServer => ".page.server",
      Self::PageClient => ".page.client",
      Self::PageRoute => ".page.route",
      Self::Css => ".css",
      Self::PlusConfig => "+config",
      Self::PlusFile => "+",
    }
  }

  pub fn from_tag(tag: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.tag() == tag)
  }
}

impl fmt::Display for FileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

fn file_name(file_path: &str) -> &str {
  file_path.rsplit('/').next().unwrap_or(file_path)
}

pub fn is_script_file(file_path: &str) -> bool {
  file_name(file_path)
    .rsplit_once('.')
    .is_some_and(|(stem, ext)| !stem.is_empty() && SCRIPT_EXTENSIONS.contains(&ext))
}

/// Determine the file type of `file_path` from its suffix.
/// Callers are expected to pass paths already filtered to known patterns.
pub fn classify(file_path: &str) -> Result<FileType> {
  if file_path.ends_with(".css") {
    return Ok(FileType::Css);
  }
  if !is_script_file(file_path) {
    return Err(PlinthError::internal(format!("unexpected page file extension: {file_path}")));
  }

  let name = file_name(file_path);
  if let Some(rest) = name.strip_prefix('+') {
    let config_name = rest.split('.').next().unwrap_or_default();
    return match config_name {
      "" => Err(PlinthError::internal(format!("empty config name: {file_path}"))),
      "config" => Ok(FileType::PlusConfig),
      _ => Ok(FileType::PlusFile),
    };
  }

  // `<stem>.page.<ext>` or `<stem>.page.<env>.<ext>`
  let segments: Vec<&str> = name.split('.').collect();
  let n = segments.len();
  if n >= 3 && segments[n - 2] == "page" {
    return Ok(FileType::Page);
  }
  if n >= 4 && segments[n - 3] == "page" {
    match segments[n - 2] {
      "server" => return Ok(FileType::PageServer),
      "client" => return Ok(FileType::PageClient),
      "route" => return Ok(FileType::PageRoute),
      _ => {}
    }
  }
  Err(PlinthError::internal(format!("cannot determine page file type of {file_path}")))
}

/// `onRenderHtml` for `/pages/+onRenderHtml.ts`; `None` for anything else.
pub fn plus_config_name(file_path: &str) -> Option<&str> {
  let rest = file_name(file_path).strip_prefix('+')?;
  let name = rest.split('.').next()?;
  if name.is_empty() { None } else { Some(name) }
}
