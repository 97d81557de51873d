//! View-scoped request handles.
//!
//! Network fetches are spawned per view and tied to that view's lifetime:
//! dropping the handle aborts the task, so a torn-down view can never
//! observe a stale result. This replaces the manual in-flight guard flags
//! the upstream UI used.

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors produced when joining a [`RequestHandle`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The task was aborted before it produced a value.
    #[error("request was aborted")]
    Aborted,
}

/// An abortable handle to an in-flight request task.
///
/// Aborts the task when dropped.
#[derive(Debug)]
pub struct RequestHandle<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> RequestHandle<T> {
    /// Spawn a request task owned by this handle.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Abort the task without waiting for it.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Whether the task has finished (completed or aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task's value.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if the task was aborted first.
    ///
    /// # Panics
    ///
    /// Resumes the panic if the task itself panicked.
    pub async fn join(mut self) -> Result<T, FetchError> {
        match (&mut self.handle).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(FetchError::Aborted),
        }
    }
}

impl<T> Drop for RequestHandle<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_completed_request() {
        let handle = RequestHandle::spawn(async { 21 * 2 });
        assert_eq!(handle.join().await, Ok(42));
    }

    #[tokio::test]
    async fn test_abort_then_join() {
        let handle = RequestHandle::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            0
        });
        handle.abort();
        assert_eq!(handle.join().await, Err(FetchError::Aborted));
    }

    #[tokio::test]
    async fn test_drop_aborts_in_flight_request() {
        let landed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&landed);

        let handle = RequestHandle::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(handle);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!landed.load(Ordering::SeqCst));
    }
}
