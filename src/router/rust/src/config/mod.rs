/* src/router/rust/src/config/mod.rs */

// Directory-scoped config layers merged into one effective config per page.
// Deeper layers override shallower ones; global configs are merged separately.

mod definitions;
mod location;
mod merge;
mod types;

#[cfg(test)]
mod tests;

pub(crate) use definitions::is_function_marker;
pub use location::{is_inherited, location_id, route_filesystem};
pub use merge::{merge_global, merge_page_configs, parse_config_global, parse_config_layers};
pub use types::{
  BundleSide, ConfigEnv, ConfigValue, DefinedAt, PageConfig, PageConfigGlobal, RawConfigGlobal,
  RawConfigLayer, RawConfigValue, RouteFilesystem,
};
