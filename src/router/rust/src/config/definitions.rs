/* src/router/rust/src/config/definitions.rs */

use serde_json::Value;

use super::types::ConfigEnv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ValueType {
  Any,
  Boolean,
  String,
  StringArray,
  /// Route string or a `{ "$function": ... }` marker for a route function.
  Route,
  /// Object of string values, e.g. `redirects`.
  StringMap,
}

impl ValueType {
  pub(super) fn accepts(self, value: &Value) -> bool {
    match self {
      Self::Any => true,
      Self::Boolean => value.is_boolean(),
      Self::String => value.is_string(),
      Self::StringArray => value.as_array().is_some_and(|items| items.iter().all(Value::is_string)),
      Self::Route => value.is_string() || is_function_marker(value),
      Self::StringMap => value.as_object().is_some_and(|obj| obj.values().all(Value::is_string)),
    }
  }

  pub(super) fn describe(self) -> &'static str {
    match self {
      Self::Any => "any value",
      Self::Boolean => "a boolean",
      Self::String => "a string",
      Self::StringArray => "a string array",
      Self::Route => "a string or a function",
      Self::StringMap => "an object of strings",
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct ConfigDefinition {
  pub(super) env: ConfigEnv,
  pub(super) value_type: ValueType,
  /// Applies to the whole app; only allowed at the root location.
  pub(super) global: bool,
}

const fn def(env: ConfigEnv, value_type: ValueType) -> ConfigDefinition {
  ConfigDefinition { env, value_type, global: false }
}

const fn global(env: ConfigEnv, value_type: ValueType) -> ConfigDefinition {
  ConfigDefinition { env, value_type, global: true }
}

pub(super) fn builtin(name: &str) -> Option<ConfigDefinition> {
  use ConfigEnv::*;
  let definition = match name {
    "Page" => def(ServerAndClient, ValueType::Any),
    "onRenderHtml" | "onBeforeRender" | "guard" => def(ServerOnly, ValueType::Any),
    "passToClient" => def(ServerOnly, ValueType::StringArray),
    "onRenderClient" => def(ClientOnly, ValueType::Any),
    "client" => def(ClientOnly, ValueType::String),
    "hydrationCanBeAborted" => def(ClientOnly, ValueType::Boolean),
    "route" => def(RoutingEager, ValueType::Route),
    "clientRouting" | "prerender" => def(ConfigOnly, ValueType::Boolean),
    "meta" => def(ConfigOnly, ValueType::Any),
    "redirects" => global(ConfigOnly, ValueType::StringMap),
    "trailingSlash" | "disableUrlNormalization" => global(ConfigOnly, ValueType::Boolean),
    "onBeforeRoute" => global(RoutingEager, ValueType::Any),
    "onPrerenderStart" => global(ServerOnly, ValueType::Any),
    _ => return None,
  };
  Some(definition)
}

pub(super) fn is_global(name: &str) -> bool {
  builtin(name).is_some_and(|d| d.global)
}

pub(crate) fn is_function_marker(value: &Value) -> bool {
  value.as_object().is_some_and(|obj| obj.contains_key("$function"))
}

pub(super) fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) if is_function_marker(value) => "function",
    Value::Object(_) => "object",
  }
}
