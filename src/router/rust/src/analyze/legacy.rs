/* src/router/rust/src/analyze/legacy.rs */

// Analyzer for pages defined by `.page.*` file conventions, where the page
// is described by the flat file list rather than a merged config.

use std::cmp::Ordering;
use std::sync::Arc;

use futures_util::future::try_join_all;

use super::client_dependency::{AnalysisResult, ClientDependency};
use crate::errors::{Result, ensure_usage};
use crate::file_type::FileType;
use crate::page_file::{PageFile, PageFileEnv, is_ancestor_default_page};
use crate::session::SessionOptions;

/// Most specific first: page files, then non-renderer defaults, then the
/// nearest ancestor, then env-specific files before isomorphic ones.
fn compare_page_files(a: &PageFile, b: &PageFile, env: PageFileEnv, page_id: &str) -> Ordering {
  let by_default = a.is_default_page_file().cmp(&b.is_default_page_file());
  if by_default != Ordering::Equal {
    return by_default;
  }
  let by_renderer = a.is_renderer_page_file().cmp(&b.is_renderer_page_file());
  if by_renderer != Ordering::Equal {
    return by_renderer;
  }
  if is_ancestor_default_page(page_id, a.file_path())
    && is_ancestor_default_page(page_id, b.file_path())
  {
    let depth = |f: &PageFile| f.file_path().split('/').count();
    let by_depth = depth(b).cmp(&depth(a));
    if by_depth != Ordering::Equal {
      return by_depth;
    }
  }
  match (a.is_env(env), b.is_env(env)) {
    (true, false) if b.is_env(PageFileEnv::ClientAndServer) => Ordering::Less,
    (false, true) if a.is_env(PageFileEnv::ClientAndServer) => Ordering::Greater,
    _ => Ordering::Equal,
  }
}

/// Files loaded on one side for `page_id`, most specific first.
fn determine(
  page_files_all: &[Arc<PageFile>],
  page_id: &str,
  env: PageFileEnv,
) -> Result<Vec<Arc<PageFile>>> {
  let mut relevant: Vec<Arc<PageFile>> = page_files_all
    .iter()
    .filter(|p| p.is_relevant(page_id) && p.file_type() != FileType::PageRoute)
    .cloned()
    .collect();
  relevant.sort_by(|a, b| compare_page_files(a, b, env, page_id));

  let page_id_file = |iso: bool| -> Result<Option<Arc<PageFile>>> {
    let target = if iso { PageFileEnv::ClientAndServer } else { env };
    let files: Vec<&Arc<PageFile>> =
      relevant.iter().filter(|p| p.page_id() == page_id && p.is_env(target)).collect();
    ensure_usage(files.len() <= 1, || {
      let paths: Vec<&str> = files.iter().map(|p| p.file_path()).collect();
      format!("Merge the following files into a single file: {}", paths.join(" "))
    })?;
    Ok(files.first().map(|p| (*p).clone()))
  };
  let renderer_file = |iso: bool| {
    let target = if iso { PageFileEnv::ClientAndServer } else { env };
    relevant.iter().find(|p| p.is_renderer_page_file() && p.is_env(target)).cloned()
  };

  let mut files = Vec::new();
  files.extend(page_id_file(false)?);
  files.extend(page_id_file(true)?);
  let defaults = relevant.iter().filter(|p| {
    p.is_default_page_file()
      && !p.is_renderer_page_file()
      && (p.is_env(env) || p.is_env(PageFileEnv::ClientAndServer))
  });
  files.extend(defaults.cloned());
  files.extend(renderer_file(false));
  files.extend(renderer_file(true));
  Ok(files)
}

fn is_html_only(client_side: &[Arc<PageFile>], server_side: &[Arc<PageFile>], page_id: &str) -> bool {
  let has_page_isomorph =
    client_side.iter().any(|p| p.page_id() == page_id && p.file_type() == FileType::Page);
  if has_page_isomorph {
    return false;
  }
  let has_page_server =
    server_side.iter().any(|p| p.page_id() == page_id && p.file_type() == FileType::PageServer);
  if !has_page_server {
    return false;
  }
  let defines_client_renderer = client_side.iter().any(|p| {
    p.page_id() == page_id && p.file_type() == FileType::PageClient && p.has_export("render")
  });
  !defines_client_renderer
}

/// A client file exporting `overrideDefaults` drops every less specific file after it.
fn remove_overridden_page_files(client_side: Vec<Arc<PageFile>>) -> Vec<Arc<PageFile>> {
  let mut kept = Vec::new();
  for file in client_side {
    let stop = file.has_export("overrideDefaults");
    kept.push(file);
    if stop {
      break;
    }
  }
  kept
}

pub(super) async fn analyze_page_client_side(
  page_files_all: &[Arc<PageFile>],
  page_id: &str,
  options: &SessionOptions,
) -> Result<AnalysisResult> {
  let mut client_side = determine(page_files_all, page_id, PageFileEnv::ClientOnly)?;
  let server_side = determine(page_files_all, page_id, PageFileEnv::ServerOnly)?;

  try_join_all(
    client_side
      .iter()
      .filter(|p| p.export_names().is_none() && p.has_export_names_loader())
      .map(|p| p.load_export_names()),
  )
  .await?;

  let is_html_only = is_html_only(&client_side, &server_side, page_id);
  let is_client_routing = client_side.iter().any(|p| p.has_export("clientRouting"));

  if is_html_only {
    client_side.retain(|p| p.is_env(PageFileEnv::ClientOnly) && !p.has_export("render"));
    client_side = remove_overridden_page_files(client_side);
  }

  let mut client_entries = Vec::new();
  let mut client_dependencies = Vec::new();
  for file in &client_side {
    // nothing of an HTML-only page executes in the browser
    client_dependencies.push(if is_html_only {
      ClientDependency::assets(file.file_path())
    } else {
      ClientDependency::code(file.file_path())
    });
  }
  for file in &server_side {
    if client_dependencies.iter().any(|dep| dep.id == file.file_path()) {
      continue;
    }
    client_dependencies.push(ClientDependency::assets(file.file_path()));
  }
  if !is_html_only {
    let entry = options.client_runtime_entry(is_client_routing);
    client_dependencies.push(ClientDependency::code(entry));
    client_entries.push(entry.to_string());
  }

  Ok(AnalysisResult {
    is_html_only,
    is_client_routing,
    client_entries,
    client_dependencies,
    page_files_client_side: client_side.iter().map(|p| p.file_path().to_string()).collect(),
    page_files_server_side: server_side.iter().map(|p| p.file_path().to_string()).collect(),
  })
}
