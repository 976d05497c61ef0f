/* src/router/rust/src/errors.rs */

use thiserror::Error;

/// Errors raised while resolving pages.
///
/// `Internal` marks a broken contract between this crate and the code that
/// generated its input (usually a stale build artifact or a mismatched
/// bundler). `Usage` is a user misconfiguration and always carries
/// remediation guidance. `Clone` lets a shared in-flight load hand the same
/// failure to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlinthError {
  #[error("[plinth][Bug] {0}")]
  Internal(String),
  #[error("[plinth][Wrong Usage] {0}")]
  Usage(String),
  #[error("[plinth] failed to load {file_path}: {message}")]
  Load { file_path: String, message: String },
}

impl PlinthError {
  pub fn internal(msg: impl Into<String>) -> Self {
    Self::Internal(msg.into())
  }

  pub fn usage(msg: impl Into<String>) -> Self {
    Self::Usage(msg.into())
  }

  pub fn load(file_path: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Load { file_path: file_path.into(), message: message.into() }
  }

  pub fn is_internal(&self) -> bool {
    matches!(self, Self::Internal(_))
  }

  pub fn is_usage(&self) -> bool {
    matches!(self, Self::Usage(_))
  }
}

pub type Result<T, E = PlinthError> = std::result::Result<T, E>;

/// Return an internal error unless `cond` holds.
pub(crate) fn ensure_internal(cond: bool, msg: impl FnOnce() -> String) -> Result<()> {
  if cond { Ok(()) } else { Err(PlinthError::Internal(msg())) }
}

/// Return a usage error unless `cond` holds.
pub(crate) fn ensure_usage(cond: bool, msg: impl FnOnce() -> String) -> Result<()> {
  if cond { Ok(()) } else { Err(PlinthError::Usage(msg())) }
}
