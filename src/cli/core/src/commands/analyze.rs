/* src/cli/core/src/commands/analyze.rs */

use anyhow::{Context, Result};
use plinth_router::BuildSession;

use crate::ui;

pub async fn run_analyze(session: &BuildSession, page_id: &str, json: bool) -> Result<()> {
  let result = session
    .analyze_page(page_id)
    .await
    .with_context(|| format!("failed to analyze {page_id}"))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&result)?);
    return Ok(());
  }

  let mode = if result.is_client_routing { "client routing" } else { "server routing" };
  if result.is_html_only {
    ui::ok(&format!("{page_id}: HTML-only ({mode})"));
  } else {
    ui::ok(&format!("{page_id}: {mode}"));
  }
  for entry in &result.client_entries {
    ui::arrow(&format!("entry {entry}"));
  }
  for dep in &result.client_dependencies {
    let kind = match (dep.only_assets, dep.eagerly_imported) {
      (true, _) => "assets",
      (false, true) => "eager",
      (false, false) => "code",
    };
    ui::detail(&format!("{kind:<6} {}", dep.id));
  }

  if session.options().debug {
    ui::blank();
    ui::arrow("client-side page files");
    for file in &result.page_files_client_side {
      ui::detail(file);
    }
    ui::arrow("server-side page files");
    for file in &result.page_files_server_side {
      ui::detail(file);
    }
  }
  Ok(())
}
