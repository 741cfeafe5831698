//! Rate limiting for UI-driven calls: debounce and throttle.
//!
//! Both must be used from within a tokio runtime.

use std::time::Duration;

use tokio::{task::JoinHandle, time::Instant};

/// Runs only the last of a burst of calls, `wait` after that last call.
#[derive(Debug)]
pub struct Debouncer {
  wait:    Duration,
  pending: Option<JoinHandle<()>>,
}

impl Debouncer {
  pub fn new(wait: Duration) -> Self {
    Self { wait, pending: None }
  }

  /// Schedule `f`, cancelling whatever was scheduled before.
  pub fn call<F>(&mut self, f: F)
  where
    F: FnOnce() + Send + 'static,
  {
    self.cancel();
    let wait = self.wait;
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(wait).await;
      f();
    }));
  }

  /// Drop the scheduled call, if it has not run yet.
  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) {
    self.cancel();
  }
}

/// Runs the first call of each `limit`-long window and drops the rest.
#[derive(Debug)]
pub struct Throttle {
  limit: Duration,
  last:  Option<Instant>,
}

impl Throttle {
  pub fn new(limit: Duration) -> Self {
    Self { limit, last: None }
  }

  /// Run `f` unless a call ran less than `limit` ago.
  pub fn call<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
    let now = Instant::now();
    if let Some(last) = self.last
      && now.duration_since(last) < self.limit
    {
      return None;
    }
    self.last = Some(now);
    Some(f())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;

  #[tokio::test(start_paused = true)]
  async fn debounce_runs_only_the_last_call() {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(Duration::from_millis(300));

    for i in 1..=3 {
      let hits = hits.clone();
      let last = last.clone();
      debouncer.call(move || {
        hits.fetch_add(1, Ordering::SeqCst);
        last.store(i, Ordering::SeqCst);
      });
      tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn cancelled_debounce_never_runs() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    let h = hits.clone();
    debouncer.call(move || {
      h.fetch_add(1, Ordering::SeqCst);
    });
    debouncer.cancel();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn throttle_drops_calls_inside_window() {
    let mut throttle = Throttle::new(Duration::from_millis(100));
    assert_eq!(throttle.call(|| 1), Some(1));
    assert_eq!(throttle.call(|| 2), None);

    tokio::time::advance(Duration::from_millis(60)).await;
    assert_eq!(throttle.call(|| 3), None);

    tokio::time::advance(Duration::from_millis(40)).await;
    assert_eq!(throttle.call(|| 4), Some(4));
  }
}
