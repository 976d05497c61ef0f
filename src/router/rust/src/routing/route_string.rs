/* src/router/rust/src/routing/route_string.rs */

use std::collections::BTreeMap;

use regex::Regex;

use crate::errors::{PlinthError, Result, ensure_usage};

/// Key under which the trailing `*` segment is captured.
pub const WILDCARD_PARAM: &str = "*";

/// A route string such as `/product/@id/*` compiled to a matcher.
#[derive(Debug, Clone)]
pub struct RouteString {
  source: String,
  pattern: Regex,
  params: Vec<String>,
  static_segments: usize,
  has_wildcard: bool,
}

impl RouteString {
  pub fn parse(route: &str) -> Result<Self> {
    ensure_usage(route.starts_with('/'), || {
      format!("invalid route string `{route}`: it should start with `/`")
    })?;

    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    let mut pattern = String::from("^");
    let mut params = Vec::new();
    let mut static_segments = 0;
    let mut has_wildcard = false;

    for (i, segment) in segments.iter().enumerate() {
      let is_last = i + 1 == segments.len();
      if *segment == "*" {
        ensure_usage(is_last, || {
          format!("invalid route string `{route}`: `*` is only allowed as last segment")
        })?;
        has_wildcard = true;
        pattern.push_str("(?:/(.*))?");
      } else if let Some(name) = segment.strip_prefix('@') {
        ensure_usage(!name.is_empty(), || {
          format!("invalid route string `{route}`: parameter without a name")
        })?;
        params.push(name.to_string());
        pattern.push_str("/([^/]+)");
      } else {
        static_segments += 1;
        pattern.push('/');
        pattern.push_str(&regex::escape(segment));
      }
    }
    if !has_wildcard {
      pattern.push_str("/?");
    }
    pattern.push('$');

    let pattern = Regex::new(&pattern)
      .map_err(|e| PlinthError::internal(format!("route `{route}` compiled to a bad pattern: {e}")))?;
    Ok(Self { source: route.to_string(), pattern, params, static_segments, has_wildcard })
  }

  pub fn as_str(&self) -> &str {
    &self.source
  }

  /// Params of `pathname` if it matches. The wildcard tail is stored under [`WILDCARD_PARAM`].
  pub fn matches(&self, pathname: &str) -> Option<BTreeMap<String, String>> {
    let captures = self.pattern.captures(pathname)?;
    let mut values = captures.iter().skip(1);
    let mut params = BTreeMap::new();
    for name in &self.params {
      let value = values.next().flatten()?;
      params.insert(name.clone(), value.as_str().to_string());
    }
    if self.has_wildcard {
      let tail = values.next().flatten().map(|m| m.as_str()).unwrap_or_default();
      params.insert(WILDCARD_PARAM.to_string(), tail.to_string());
    }
    Some(params)
  }

  /// Ordering key: more static segments first, then no wildcard, then fewer params.
  pub(super) fn precedence(&self) -> (usize, bool, std::cmp::Reverse<usize>) {
    (self.static_segments, !self.has_wildcard, std::cmp::Reverse(self.params.len()))
  }
}

/// Match `pathname` against `route`, returning the route params on success.
pub fn resolve_route_string(route: &str, pathname: &str) -> Result<Option<BTreeMap<String, String>>> {
  Ok(RouteString::parse(route)?.matches(pathname))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn static_route() {
    assert_eq!(resolve_route_string("/about", "/about").unwrap(), Some(BTreeMap::new()));
    assert_eq!(resolve_route_string("/about", "/about/").unwrap(), Some(BTreeMap::new()));
    assert_eq!(resolve_route_string("/about", "/about/team").unwrap(), None);
    assert_eq!(resolve_route_string("/", "/").unwrap(), Some(BTreeMap::new()));
  }

  #[test]
  fn params_are_captured() {
    let params = resolve_route_string("/product/@id/@tab", "/product/42/reviews").unwrap().unwrap();
    assert_eq!(params["id"], "42");
    assert_eq!(params["tab"], "reviews");
    assert_eq!(resolve_route_string("/product/@id", "/product").unwrap(), None);
  }

  #[test]
  fn wildcard_takes_the_tail() {
    let params = resolve_route_string("/docs/*", "/docs/guide/intro").unwrap().unwrap();
    assert_eq!(params[WILDCARD_PARAM], "guide/intro");
    let params = resolve_route_string("/docs/*", "/docs").unwrap().unwrap();
    assert_eq!(params[WILDCARD_PARAM], "");
  }

  #[test]
  fn static_segments_are_escaped() {
    assert!(resolve_route_string("/a.b", "/a.b").unwrap().is_some());
    assert!(resolve_route_string("/a.b", "/axb").unwrap().is_none());
  }

  #[test]
  fn malformed_routes_are_usage_errors() {
    assert!(RouteString::parse("about").unwrap_err().is_usage());
    assert!(RouteString::parse("/*/x").unwrap_err().is_usage());
    assert!(RouteString::parse("/@").unwrap_err().is_usage());
  }
}
