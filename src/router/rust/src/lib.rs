/* src/router/rust/src/lib.rs */

pub mod analyze;
pub mod config;
pub mod errors;
pub mod file_type;
pub mod glob;
pub mod page_file;
pub mod routing;
pub mod session;
pub mod virtual_file;

// Re-exports for ergonomic use
pub use analyze::{AnalysisResult, ClientDependency, analyze_page};
pub use errors::{PlinthError, Result};
pub use file_type::{FileType, classify};
pub use glob::{ModuleHost, RawGlobResults, parse_glob_results};
pub use page_file::{BoxFuture, PageFile};
pub use session::{BuildSession, SessionOptions};
