/* src/cli/core/src/config/tests/loading.rs */

use std::fs;

use super::*;

#[test]
fn finds_config_in_ancestor_directory() {
  let tmp = tempfile::tempdir().unwrap();
  fs::write(tmp.path().join("plinth.toml"), "[project]\nname = \"app\"\n").unwrap();
  let nested = tmp.path().join("pages").join("about");
  fs::create_dir_all(&nested).unwrap();

  let found = find_plinth_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join("plinth.toml"));
  assert_eq!(load_plinth_config(&found).unwrap().project.name, "app");
}

#[test]
fn missing_start_directory_is_reported() {
  let tmp = tempfile::tempdir().unwrap();
  let err = find_plinth_config(&tmp.path().join("missing")).unwrap_err();
  assert!(err.to_string().contains("failed to canonicalize"));
}

#[test]
fn invalid_config_names_the_file() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join("plinth.toml");
  fs::write(&path, "[project]\nname = \"app\"\n\n[redirects]\n\"old\" = \"/\"\n").unwrap();
  let err = load_plinth_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("plinth.toml"));
  assert!(format!("{err:#}").contains("must start with /"));
}
