/* src/router/rust/src/page_file/load_cell.rs */

use std::future::Future;
use std::pin::Pin;

use futures_util::FutureExt;
use futures_util::future::Shared;
use parking_lot::Mutex;

use crate::errors::Result;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

type SharedLoad<T> = Shared<BoxFuture<Result<T>>>;

pub(crate) enum LoadState<T: Clone> {
  NotLoaded,
  /// In-flight load; every caller awaits a clone of the same handle.
  Loading(SharedLoad<T>),
  Loaded(T),
}

/// Memoised single-flight slot: the load future runs at most once per
/// successful result, however many callers race on it. A failed load is
/// forgotten so the next caller starts over.
pub(crate) struct LoadCell<T: Clone> {
  state: Mutex<LoadState<T>>,
}

impl<T> LoadCell<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub(crate) fn new() -> Self {
    Self { state: Mutex::new(LoadState::NotLoaded) }
  }

  pub(crate) fn get(&self) -> Option<T> {
    match &*self.state.lock() {
      LoadState::Loaded(value) => Some(value.clone()),
      _ => None,
    }
  }

  pub(crate) fn set(&self, value: T) {
    *self.state.lock() = LoadState::Loaded(value);
  }

  pub(crate) fn is_loading(&self) -> bool {
    matches!(&*self.state.lock(), LoadState::Loading(_))
  }

  pub(crate) async fn get_or_load<F>(&self, start: F) -> Result<T>
  where
    F: FnOnce() -> BoxFuture<Result<T>>,
  {
    let pending = {
      let mut state = self.state.lock();
      match &*state {
        LoadState::Loaded(value) => return Ok(value.clone()),
        LoadState::Loading(pending) => pending.clone(),
        LoadState::NotLoaded => {
          let pending = start().shared();
          *state = LoadState::Loading(pending.clone());
          pending
        }
      }
    };

    let result = pending.clone().await;

    let mut state = self.state.lock();
    let still_pending = matches!(&*state, LoadState::Loading(current) if current.ptr_eq(&pending));
    if still_pending {
      *state = match &result {
        Ok(value) => LoadState::Loaded(value.clone()),
        Err(_) => LoadState::NotLoaded,
      };
    }
    result
  }
}
