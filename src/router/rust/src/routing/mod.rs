/* src/router/rust/src/routing/mod.rs */

mod route_string;


use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{PageConfig, is_function_marker, route_filesystem};
use crate::errors::{PlinthError, Result};
use crate::file_type::FileType;
use crate::page_file::PageFile;

pub use route_string::{RouteString, WILDCARD_PARAM, resolve_route_string};

#[derive(Debug, Clone)]
pub enum RouteMatcher {
  /// Derived from the page's directory.
  Filesystem(RouteString),
  /// Declared by the page.
  RouteString(RouteString),
  /// A route function, evaluated by the server runtime only.
  Function { defined_at: String },
}

impl RouteMatcher {
  pub fn describe(&self) -> String {
    match self {
      Self::Filesystem(route) => format!("{} (filesystem)", route.as_str()),
      Self::RouteString(route) => route.as_str().to_string(),
      Self::Function { defined_at } => format!("route function at {defined_at}"),
    }
  }

  fn route_string(&self) -> Option<&RouteString> {
    match self {
      Self::Filesystem(route) | Self::RouteString(route) => Some(route),
      Self::Function { .. } => None,
    }
  }
}

#[derive(Debug, Clone)]
pub struct PageRoute {
  pub page_id: String,
  pub matcher: RouteMatcher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
  pub page_id: String,
  pub route_params: BTreeMap<String, String>,
}

fn config_route(page_config: &PageConfig) -> Result<Option<RouteMatcher>> {
  if let Some(route) = page_config.get("route") {
    if let Some(route_string) = route.value.as_str() {
      return Ok(Some(RouteMatcher::RouteString(RouteString::parse(route_string)?)));
    }
    if is_function_marker(&route.value) {
      return Ok(Some(RouteMatcher::Function { defined_at: route.defined_at.to_string() }));
    }
  }
  match &page_config.route_filesystem {
    Some(fs) => Ok(Some(RouteMatcher::Filesystem(RouteString::parse(&fs.route_string)?))),
    None => Ok(None),
  }
}

async fn legacy_route(page_files_all: &[Arc<PageFile>], page_id: &str) -> Result<RouteMatcher> {
  let route_file = page_files_all
    .iter()
    .find(|p| p.page_id() == page_id && p.file_type() == FileType::PageRoute);
  let Some(route_file) = route_file else {
    return Ok(RouteMatcher::Filesystem(RouteString::parse(&route_filesystem(page_id))?));
  };
  let exports = route_file.load_file().await?;
  match exports.get("default") {
    Some(Value::String(route)) => Ok(RouteMatcher::RouteString(RouteString::parse(route)?)),
    Some(value) if is_function_marker(value) => {
      Ok(RouteMatcher::Function { defined_at: route_file.file_path().to_string() })
    }
    _ => Err(PlinthError::usage(format!(
      "{} should export a default route string or route function",
      route_file.file_path()
    ))),
  }
}

/// Routes of every routable page: configured pages first, then pages defined
/// by `.page.*` files. Error pages are never routed.
pub async fn page_routes(
  page_files_all: &[Arc<PageFile>],
  page_configs: &[PageConfig],
) -> Result<Vec<PageRoute>> {
  let mut routes = Vec::new();
  for page_config in page_configs.iter().filter(|c| !c.is_error_page) {
    if let Some(matcher) = config_route(page_config)? {
      routes.push(PageRoute { page_id: page_config.page_id.clone(), matcher });
    }
  }

  let legacy_page_ids: BTreeSet<&str> = page_files_all
    .iter()
    .filter(|p| !p.is_default_page_file() && !p.is_error_page_file())
    .filter(|p| !p.page_id().is_empty())
    .filter(|p| p.file_type() != FileType::Css)
    .map(|p| p.page_id())
    .collect();
  for page_id in legacy_page_ids {
    let matcher = legacy_route(page_files_all, page_id).await?;
    routes.push(PageRoute { page_id: page_id.to_string(), matcher });
  }

  tracing::debug!(count = routes.len(), "collected page routes");
  Ok(routes)
}

/// The page that renders `pathname`. Among several matches the most specific
/// route wins; route functions are skipped.
pub fn route_url(routes: &[PageRoute], pathname: &str) -> Option<RouteMatch> {
  let mut best: Option<(&RouteString, RouteMatch)> = None;
  for route in routes {
    let Some(route_string) = route.matcher.route_string() else {
      continue;
    };
    let Some(route_params) = route_string.matches(pathname) else {
      continue;
    };
    let better = best.as_ref().is_none_or(|(current, _)| route_string.precedence() > current.precedence());
    if better {
      best = Some((route_string, RouteMatch { page_id: route.page_id.clone(), route_params }));
    }
  }
  best.map(|(_, matched)| matched)
}
