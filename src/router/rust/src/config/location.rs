/* src/router/rust/src/config/location.rs */

/// Directories that never appear in a filesystem route.
const ROUTE_IGNORED_DIRS: &[&str] = &["pages", "src", "index"];

/// Location a config layer applies to: its directory, with a trailing
/// `renderer` directory folded into its parent.
pub fn location_id(directory: &str) -> String {
  let mut segments: Vec<&str> = directory.split('/').filter(|s| !s.is_empty()).collect();
  if segments.last() == Some(&"renderer") {
    segments.pop();
  }
  format!("/{}", segments.join("/"))
}

/// Whether configs at `location` apply to the page at `page_location`.
pub fn is_inherited(location: &str, page_location: &str) -> bool {
  location == "/"
    || location == page_location
    || page_location.strip_prefix(location).is_some_and(|rest| rest.starts_with('/'))
}

pub(super) fn depth(location: &str) -> usize {
  location.split('/').filter(|s| !s.is_empty()).count()
}

pub(super) fn is_error_page_location(location: &str) -> bool {
  location.rsplit('/').next() == Some("_error")
}

/// `/pages/(marketing)/about/index` -> `/about`
pub fn route_filesystem(location: &str) -> String {
  let segments: Vec<&str> = location
    .split('/')
    .filter(|s| !s.is_empty())
    .filter(|s| !ROUTE_IGNORED_DIRS.contains(s))
    .filter(|s| !(s.starts_with('(') && s.ends_with(')')))
    .collect();
  format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renderer_folds_into_parent() {
    assert_eq!(location_id("/renderer"), "/");
    assert_eq!(location_id("/pages/admin/renderer/"), "/pages/admin");
    assert_eq!(location_id("/pages/admin"), "/pages/admin");
    assert_eq!(location_id("/"), "/");
  }

  #[test]
  fn inheritance_is_segment_aware() {
    assert!(is_inherited("/", "/pages/about"));
    assert!(is_inherited("/pages", "/pages/about"));
    assert!(is_inherited("/pages/about", "/pages/about"));
    assert!(!is_inherited("/pages/ab", "/pages/about"));
    assert!(!is_inherited("/pages/about", "/pages"));
  }

  #[test]
  fn filesystem_routes() {
    assert_eq!(route_filesystem("/pages/index"), "/");
    assert_eq!(route_filesystem("/pages/about"), "/about");
    assert_eq!(route_filesystem("/src/pages/(marketing)/pricing"), "/pricing");
    assert_eq!(route_filesystem("/pages/movie/@id"), "/movie/@id");
  }

  #[test]
  fn depth_counts_segments() {
    assert_eq!(depth("/"), 0);
    assert_eq!(depth("/pages/about"), 2);
    assert!(is_error_page_location("/pages/_error"));
    assert!(!is_error_page_location("/pages/about"));
  }
}
