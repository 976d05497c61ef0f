/* src/router/rust/src/config/types.rs */

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a config value is loaded, and therefore which bundle it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigEnv {
  #[serde(rename = "server-only")]
  ServerOnly,
  #[serde(rename = "client-only")]
  ClientOnly,
  #[serde(rename = "server-and-client")]
  ServerAndClient,
  /// Needed for routing before first paint: bundled eagerly on both sides.
  #[serde(rename = "_routing-eager")]
  RoutingEager,
  /// Only read while resolving configs, never bundled.
  #[serde(rename = "config-only")]
  ConfigOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleSide {
  Client,
  Server,
}

impl ConfigEnv {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::ServerOnly => "server-only",
      Self::ClientOnly => "client-only",
      Self::ServerAndClient => "server-and-client",
      Self::RoutingEager => "_routing-eager",
      Self::ConfigOnly => "config-only",
    }
  }

  pub fn is_loaded_on(self, side: BundleSide) -> bool {
    match (self, side) {
      (Self::ServerAndClient | Self::RoutingEager, _) => true,
      (Self::ServerOnly, BundleSide::Server) | (Self::ClientOnly, BundleSide::Client) => true,
      _ => false,
    }
  }

  pub fn is_eager(self) -> bool {
    self == Self::RoutingEager
  }
}

impl fmt::Display for ConfigEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Provenance of a config value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedAt {
  pub file_path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub export_path: Option<String>,
}

impl fmt::Display for DefinedAt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.export_path {
      Some(export) => write!(f, "{} > `{export}`", self.file_path),
      None => f.write_str(&self.file_path),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValue {
  pub value: Value,
  pub env: ConfigEnv,
  pub defined_at: DefinedAt,
}

/// Filesystem-derived route of a page and the location it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilesystem {
  pub route_string: String,
  pub defined_by: String,
}

/// Effective config of one page after inheritance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
  pub page_id: String,
  pub is_error_page: bool,
  pub route_filesystem: Option<RouteFilesystem>,
  pub config_values: BTreeMap<String, ConfigValue>,
}

impl PageConfig {
  pub fn get(&self, name: &str) -> Option<&ConfigValue> {
    self.config_values.get(name)
  }

  /// Defined with a non-null value.
  pub fn is_set(&self, name: &str) -> bool {
    self.get(name).is_some_and(|v| !v.value.is_null())
  }

  pub fn bool_value(&self, name: &str) -> Option<bool> {
    self.get(name).and_then(|v| v.value.as_bool())
  }

  pub fn string_value(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(|v| v.value.as_str())
  }

  /// Values bundled on `side`.
  pub fn values_for(&self, side: BundleSide) -> impl Iterator<Item = (&String, &ConfigValue)> {
    self.config_values.iter().filter(move |(_, v)| v.env.is_loaded_on(side))
  }
}

/// Configs that apply to the whole app rather than to one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfigGlobal {
  pub config_values: BTreeMap<String, ConfigValue>,
}

impl PageConfigGlobal {
  pub fn get(&self, name: &str) -> Option<&ConfigValue> {
    self.config_values.get(name)
  }

  /// `redirects` as source -> target pairs.
  pub fn redirects(&self) -> BTreeMap<String, String> {
    self
      .get("redirects")
      .and_then(|v| v.value.as_object())
      .map(|obj| {
        obj.iter().filter_map(|(from, to)| Some((from.clone(), to.as_str()?.to_string()))).collect()
      })
      .unwrap_or_default()
  }
}

// --- Raw input shapes ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfigValue {
  pub value: Value,
  #[serde(default)]
  pub env: Option<ConfigEnv>,
  pub defined_at: DefinedAt,
}

/// Config values found in one directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfigLayer {
  pub directory: String,
  #[serde(default)]
  pub config_values: BTreeMap<String, RawConfigValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfigGlobal {
  #[serde(default)]
  pub config_values: BTreeMap<String, RawConfigValue>,
}
