/* src/cli/core/src/config/tests/parsing.rs */

use std::path::Path;

use super::*;

#[test]
fn parse_minimal_config() {
  let toml_str = r#"
[project]
name = "my-app"
"#;
  let config: PlinthConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.project.name, "my-app");
  assert!(!config.runtime.production);
  assert!(!config.runtime.debug);
  assert!(config.redirects.is_empty());
  assert_eq!(config.modules.dir, ".plinth/modules");
  assert!(config.validate().is_ok());

  let options = config.session_options();
  assert_eq!(options, plinth_router::SessionOptions::default());
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[project]
name = "full-app"

[runtime]
production = true
debug = true

[entries]
client_routing = "/runtime/client-router.js"
server_routing = "/runtime/server-router.js"

[redirects]
"/old" = "/new"
"/blog/@slug" = "https://blog.example.com/@slug"

[modules]
dir = "dist/modules"
artifact = "dist/glob.json"
"#;
  let config: PlinthConfig = toml::from_str(toml_str).unwrap();
  assert!(config.validate().is_ok());
  let options = config.session_options();
  assert!(options.is_production);
  assert!(options.debug);
  assert_eq!(options.client_runtime_entry(true), "/runtime/client-router.js");
  assert_eq!(options.client_runtime_entry(false), "/runtime/server-router.js");
  assert_eq!(options.redirects["/old"], "/new");
  assert_eq!(config.modules_dir(Path::new("/app")), Path::new("/app/dist/modules"));
  assert_eq!(config.artifact_path(Path::new("/app")), Path::new("/app/dist/glob.json"));
}

#[test]
fn project_name_is_required() {
  let toml_str = r#"
[runtime]
production = true
"#;
  assert!(toml::from_str::<PlinthConfig>(toml_str).is_err());
}

#[test]
fn empty_entry_is_rejected() {
  let toml_str = r#"
[project]
name = "my-app"

[entries]
client_routing = " "
"#;
  let config: PlinthConfig = toml::from_str(toml_str).unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("entries.client_routing"));
}

#[test]
fn relative_redirect_source_is_rejected() {
  let toml_str = r#"
[project]
name = "my-app"

[redirects]
"old" = "/new"
"#;
  let config: PlinthConfig = toml::from_str(toml_str).unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("must start with /"));
}
