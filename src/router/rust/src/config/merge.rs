/* src/router/rust/src/config/merge.rs */

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::definitions::{builtin, is_global, type_name};
use super::location::{depth, is_error_page_location, is_inherited, location_id, route_filesystem};
use super::types::{
  ConfigEnv, ConfigValue, PageConfig, PageConfigGlobal, RawConfigGlobal, RawConfigLayer,
  RawConfigValue, RouteFilesystem,
};
use crate::errors::{PlinthError, Result, ensure_internal, ensure_usage};

/// Decode the raw `pageConfigs` array of the generated artifact.
pub fn parse_config_layers(raw: Value) -> Result<Vec<RawConfigLayer>> {
  let layers: Vec<RawConfigLayer> = serde_json::from_value(raw)
    .map_err(|e| PlinthError::internal(format!("`pageConfigs` is malformed: {e}")))?;
  for layer in &layers {
    ensure_internal(layer.directory.starts_with('/') && !layer.directory.contains('\\'), || {
      format!("`pageConfigs` directory should be an absolute posix path: {}", layer.directory)
    })?;
  }
  Ok(layers)
}

/// Decode the raw `pageConfigGlobal` object of the generated artifact.
pub fn parse_config_global(raw: Value) -> Result<RawConfigGlobal> {
  serde_json::from_value(raw)
    .map_err(|e| PlinthError::internal(format!("`pageConfigGlobal` is malformed: {e}")))
}

/// Layers sharing a location, merged. Defining one config twice at the same
/// location is ambiguous and rejected.
fn group_by_location(
  layers: &[RawConfigLayer],
) -> Result<BTreeMap<String, BTreeMap<String, RawConfigValue>>> {
  let mut locations: BTreeMap<String, BTreeMap<String, RawConfigValue>> = BTreeMap::new();
  for layer in layers {
    let values = locations.entry(location_id(&layer.directory)).or_default();
    for (name, raw) in &layer.config_values {
      if let Some(existing) = values.get(name) {
        return Err(PlinthError::usage(format!(
          "`{name}` is defined twice: at {} and at {}. Remove one of the two definitions.",
          existing.defined_at, raw.defined_at
        )));
      }
      values.insert(name.clone(), raw.clone());
    }
  }
  Ok(locations)
}

/// Custom config definitions declared through `meta`.
fn collect_meta(raw: &RawConfigValue, custom: &mut HashMap<String, ConfigEnv>) -> Result<()> {
  let Some(entries) = raw.value.as_object() else {
    return Err(PlinthError::usage(format!("`meta` defined at {} should be an object", raw.defined_at)));
  };
  for (name, definition) in entries {
    let env = definition
      .get("env")
      .and_then(|env| serde_json::from_value::<ConfigEnv>(env.clone()).ok())
      .ok_or_else(|| {
        PlinthError::usage(format!(
          "`meta.{name}.env` defined at {} should be one of server-only, client-only, server-and-client, config-only",
          raw.defined_at
        ))
      })?;
    custom.insert(name.clone(), env);
  }
  Ok(())
}

fn resolve_value(
  name: &str,
  raw: &RawConfigValue,
  custom: &HashMap<String, ConfigEnv>,
) -> Result<ConfigValue> {
  let definition = builtin(name);
  if let Some(definition) = definition {
    ensure_usage(definition.value_type.accepts(&raw.value), || {
      format!(
        "`{name}` defined at {} has an invalid type `{}`: it should be {} instead",
        raw.defined_at,
        type_name(&raw.value),
        definition.value_type.describe()
      )
    })?;
  }
  let env = raw
    .env
    .or_else(|| definition.map(|d| d.env))
    .or_else(|| custom.get(name).copied())
    .ok_or_else(|| {
      PlinthError::usage(format!(
        "unknown config `{name}` defined at {}. Declare custom configs with `meta`.",
        raw.defined_at
      ))
    })?;
  Ok(ConfigValue { value: raw.value.clone(), env, defined_at: raw.defined_at.clone() })
}

/// Resolve one effective config per page. A page exists at every location
/// defining `Page`; each page inherits from every ancestor location, and a
/// deeper definition of a config always wins over a shallower one.
pub fn merge_page_configs(layers: &[RawConfigLayer]) -> Result<Vec<PageConfig>> {
  let locations = group_by_location(layers)?;

  for (location, values) in &locations {
    for (name, raw) in values {
      ensure_usage(!is_global(name) || location == "/", || {
        format!(
          "`{name}` defined at {} is a global config and can only be defined at the root (e.g. /pages/+config.js or /renderer/+config.js)",
          raw.defined_at
        )
      })?;
    }
  }

  let mut page_configs = Vec::new();
  for (page_location, page_values) in &locations {
    if !page_values.contains_key("Page") {
      continue;
    }

    let mut chain: Vec<(&String, &BTreeMap<String, RawConfigValue>)> =
      locations.iter().filter(|(loc, _)| is_inherited(loc, page_location)).collect();
    chain.sort_by_key(|(loc, _)| depth(loc));

    let mut custom = HashMap::new();
    for (_, values) in &chain {
      if let Some(meta) = values.get("meta") {
        collect_meta(meta, &mut custom)?;
      }
    }

    let mut config_values = BTreeMap::new();
    for (_, values) in &chain {
      for (name, raw) in *values {
        if is_global(name) {
          continue;
        }
        config_values.insert(name.clone(), resolve_value(name, raw, &custom)?);
      }
    }

    let is_error_page = is_error_page_location(page_location);
    let route_filesystem = (!is_error_page).then(|| RouteFilesystem {
      route_string: route_filesystem(page_location),
      defined_by: page_location.clone(),
    });

    tracing::debug!(page_id = %page_location, configs = config_values.len(), "merged page config");
    page_configs.push(PageConfig {
      page_id: page_location.clone(),
      is_error_page,
      route_filesystem,
      config_values,
    });
  }
  Ok(page_configs)
}

/// Merge global configs: the artifact's global values first, then global
/// values found in root layers, which take precedence.
pub fn merge_global(raw: &RawConfigGlobal, layers: &[RawConfigLayer]) -> Result<PageConfigGlobal> {
  let no_custom = HashMap::new();
  let mut config_values = BTreeMap::new();
  for (name, value) in &raw.config_values {
    ensure_usage(is_global(name), || {
      format!("`{name}` defined at {} is not a global config", value.defined_at)
    })?;
    config_values.insert(name.clone(), resolve_value(name, value, &no_custom)?);
  }
  for layer in layers {
    if location_id(&layer.directory) != "/" {
      continue;
    }
    for (name, value) in &layer.config_values {
      if !is_global(name) {
        continue;
      }
      if let Some(previous) = config_values.get(name) {
        tracing::debug!(config = %name, overridden = %previous.defined_at, by = %value.defined_at, "global config overridden");
      }
      config_values.insert(name.clone(), resolve_value(name, value, &no_custom)?);
    }
  }
  Ok(PageConfigGlobal { config_values })
}
