/* src/router/rust/src/config/tests.rs */

use serde_json::{Value, json};

use super::*;

fn layers(raw: Value) -> Vec<RawConfigLayer> {
  parse_config_layers(raw).unwrap()
}

fn value(value: Value, file_path: &str) -> Value {
  json!({ "value": value, "definedAt": { "filePath": file_path } })
}

fn sample_layers() -> Vec<RawConfigLayer> {
  layers(json!([
    {
      "directory": "/renderer",
      "configValues": {
        "onRenderHtml": value(json!("renderHtml"), "/renderer/+onRenderHtml.ts"),
        "onRenderClient": value(json!("renderClient"), "/renderer/+onRenderClient.ts"),
        "passToClient": value(json!(["pageProps"]), "/renderer/+config.ts"),
        "clientRouting": value(json!(false), "/renderer/+config.ts"),
        "redirects": value(json!({ "/old": "/" }), "/renderer/+config.ts")
      }
    },
    {
      "directory": "/pages/admin",
      "configValues": {
        "clientRouting": value(json!(true), "/pages/admin/+config.ts"),
        "route": value(json!("/dashboard"), "/pages/admin/+route.ts")
      }
    },
    {
      "directory": "/pages/admin/users",
      "configValues": {
        "Page": value(json!("UsersPage"), "/pages/admin/users/+Page.tsx"),
        "route": value(json!("/dashboard/users"), "/pages/admin/users/+route.ts")
      }
    },
    {
      "directory": "/pages/admin/settings",
      "configValues": {
        "Page": value(json!("SettingsPage"), "/pages/admin/settings/+Page.tsx")
      }
    },
    {
      "directory": "/pages/about",
      "configValues": {
        "Page": value(json!("AboutPage"), "/pages/about/+Page.tsx")
      }
    }
  ]))
}

fn page<'a>(configs: &'a [PageConfig], page_id: &str) -> &'a PageConfig {
  configs.iter().find(|c| c.page_id == page_id).unwrap()
}

#[test]
fn one_config_per_page() {
  let configs = merge_page_configs(&sample_layers()).unwrap();
  let ids: Vec<&str> = configs.iter().map(|c| c.page_id.as_str()).collect();
  assert_eq!(ids, vec!["/pages/about", "/pages/admin/settings", "/pages/admin/users"]);
}

#[test]
fn deeper_definition_overrides_shallower() {
  let configs = merge_page_configs(&sample_layers()).unwrap();
  let users = page(&configs, "/pages/admin/users");
  let route = users.get("route").unwrap();
  assert_eq!(route.value, json!("/dashboard/users"));
  assert_eq!(route.defined_at.file_path, "/pages/admin/users/+route.ts");
  assert_eq!(route.env, ConfigEnv::RoutingEager);
  assert_eq!(users.bool_value("clientRouting"), Some(true));
}

#[test]
fn undefined_values_fall_back_to_nearest_ancestor() {
  let configs = merge_page_configs(&sample_layers()).unwrap();
  let settings = page(&configs, "/pages/admin/settings");
  assert_eq!(settings.string_value("route"), Some("/dashboard"));
  assert_eq!(settings.get("route").unwrap().defined_at.file_path, "/pages/admin/+route.ts");

  let about = page(&configs, "/pages/about");
  assert!(about.get("route").is_none());
  assert_eq!(about.bool_value("clientRouting"), Some(false));
  assert_eq!(about.get("onRenderHtml").unwrap().defined_at.file_path, "/renderer/+onRenderHtml.ts");
}

#[test]
fn global_configs_stay_out_of_page_configs() {
  let layers = sample_layers();
  let configs = merge_page_configs(&layers).unwrap();
  assert!(page(&configs, "/pages/about").get("redirects").is_none());

  let global = merge_global(&RawConfigGlobal::default(), &layers).unwrap();
  assert_eq!(global.redirects().get("/old").map(String::as_str), Some("/"));
}

#[test]
fn filesystem_route_and_error_page() {
  let layers = layers(json!([
    { "directory": "/pages/index", "configValues": { "Page": value(json!("Home"), "/pages/index/+Page.tsx") } },
    { "directory": "/pages/_error", "configValues": { "Page": value(json!("Err"), "/pages/_error/+Page.tsx") } }
  ]));
  let configs = merge_page_configs(&layers).unwrap();
  let home = page(&configs, "/pages/index");
  assert_eq!(home.route_filesystem.as_ref().unwrap().route_string, "/");
  let error = page(&configs, "/pages/_error");
  assert!(error.is_error_page);
  assert!(error.route_filesystem.is_none());
}

#[test]
fn env_filtering_by_bundle_side() {
  let configs = merge_page_configs(&sample_layers()).unwrap();
  let users = page(&configs, "/pages/admin/users");
  let client: Vec<&str> = users.values_for(BundleSide::Client).map(|(k, _)| k.as_str()).collect();
  assert_eq!(client, vec!["Page", "onRenderClient", "route"]);
  let server: Vec<&str> = users.values_for(BundleSide::Server).map(|(k, _)| k.as_str()).collect();
  assert_eq!(server, vec!["Page", "onRenderHtml", "passToClient", "route"]);
}

#[test]
fn duplicate_definition_at_same_location_is_rejected() {
  let layers = layers(json!([
    { "directory": "/pages/about", "configValues": { "route": value(json!("/a"), "/pages/about/+config.ts") } },
    { "directory": "/pages/about", "configValues": { "route": value(json!("/b"), "/pages/about/+route.ts") } }
  ]));
  let err = merge_page_configs(&layers).unwrap_err();
  assert!(err.is_usage());
  assert!(err.to_string().contains("/pages/about/+config.ts"));
  assert!(err.to_string().contains("/pages/about/+route.ts"));
}

#[test]
fn unknown_config_requires_meta() {
  let unknown = layers(json!([
    { "directory": "/pages/about", "configValues": {
      "Page": value(json!("About"), "/pages/about/+Page.tsx"),
      "title": value(json!("About us"), "/pages/about/+title.ts")
    } }
  ]));
  let err = merge_page_configs(&unknown).unwrap_err();
  assert!(err.is_usage());
  assert!(err.to_string().contains("unknown config `title`"));

  let declared = layers(json!([
    { "directory": "/", "configValues": {
      "meta": value(json!({ "title": { "env": "server-and-client" } }), "/renderer/+config.ts")
    } },
    { "directory": "/pages/about", "configValues": {
      "Page": value(json!("About"), "/pages/about/+Page.tsx"),
      "title": value(json!("About us"), "/pages/about/+title.ts")
    } }
  ]));
  let configs = merge_page_configs(&declared).unwrap();
  assert_eq!(page(&configs, "/pages/about").get("title").unwrap().env, ConfigEnv::ServerAndClient);
}

#[test]
fn invalid_value_type_is_usage_error() {
  let layers = layers(json!([
    { "directory": "/pages/about", "configValues": {
      "Page": value(json!("About"), "/pages/about/+Page.tsx"),
      "route": value(json!(42), "/pages/about/+route.ts")
    } }
  ]));
  let err = merge_page_configs(&layers).unwrap_err();
  assert!(err.is_usage());
  assert!(err.to_string().contains("invalid type `number`"));
}

#[test]
fn route_function_marker_is_accepted() {
  let layers = layers(json!([
    { "directory": "/pages/about", "configValues": {
      "Page": value(json!("About"), "/pages/about/+Page.tsx"),
      "route": value(json!({ "$function": "routeAbout" }), "/pages/about/+route.ts")
    } }
  ]));
  assert!(merge_page_configs(&layers).is_ok());
}

#[test]
fn global_config_below_root_is_rejected() {
  let layers = layers(json!([
    { "directory": "/pages/admin", "configValues": {
      "redirects": value(json!({ "/a": "/b" }), "/pages/admin/+config.ts")
    } }
  ]));
  let err = merge_page_configs(&layers).unwrap_err();
  assert!(err.is_usage());
  assert!(err.to_string().contains("global config"));
}

#[test]
fn raw_global_values_are_validated() {
  let raw = parse_config_global(json!({
    "configValues": { "Page": value(json!("x"), "/renderer/+config.ts") }
  }))
  .unwrap();
  assert!(merge_global(&raw, &[]).unwrap_err().is_usage());
}

#[test]
fn malformed_layers_are_internal_errors() {
  assert!(parse_config_layers(json!({ "directory": "/" })).unwrap_err().is_internal());
  assert!(parse_config_layers(json!([{ "directory": "pages" }])).unwrap_err().is_internal());
  assert!(parse_config_layers(json!([{ "dir": "/" }])).unwrap_err().is_internal());
}
