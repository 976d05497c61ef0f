/* src/router/rust/src/glob/mod.rs */

// Parse the generated glob artifact: per file-type maps of eagerly or lazily
// loaded page files, plus the raw page configs, into a page file registry.

mod parse;
mod raw;


pub use parse::{ParsedGlobResults, parse_glob_results};
pub use raw::{GlobFiles, GlobMap, GlobValue, ModuleHost, RawGlobResults};
