/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{find_plinth_config, load_plinth_config};
pub use types::PlinthConfig;
