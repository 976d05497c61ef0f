/* src/cli/core/src/commands/routes.rs */

use anyhow::Result;
use plinth_router::BuildSession;

use crate::ui;

pub async fn run_routes(session: &BuildSession) -> Result<()> {
  let routes = session.routes().await?;
  if routes.is_empty() {
    ui::warn("no routable pages found");
    return Ok(());
  }
  let width = routes.iter().map(|r| r.page_id.len()).max().unwrap_or(0);
  for route in &routes {
    ui::row(&route.page_id, width, &route.matcher.describe());
  }
  ui::blank();
  ui::ok(&format!("{} routes", routes.len()));

  let redirects = &session.registry()?.redirects;
  if !redirects.is_empty() {
    ui::arrow(&format!("{} redirects", redirects.len()));
    for (from, to) in redirects {
      ui::detail(&format!("{from} -> {to}"));
    }
  }
  Ok(())
}

pub async fn run_match(session: &BuildSession, pathname: &str) -> Result<()> {
  match session.route_url(pathname).await? {
    Some(matched) => {
      ui::ok(&format!("{pathname} -> {}", matched.page_id));
      for (name, value) in &matched.route_params {
        ui::detail(&format!("{name} = {value}"));
      }
    }
    None => ui::fail(&format!("no page matches {pathname}")),
  }
  Ok(())
}
