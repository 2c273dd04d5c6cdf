//! Handles to computations running on the tokio runtime.

use std::error::Error as StdError;
use std::future::{Future, IntoFuture};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tryflow_core::{Try, TryError};

/// Handle to a computation that resolves to a [`Try`].
///
/// Either already resolved (see [`TryAsyncExt::to_async_handle`]) or backed
/// by a spawned task. Awaiting the handle never panics: a cancelled or
/// panicked task resolves to a failure.
#[derive(Debug)]
pub struct AsyncHandle<T> {
    state: HandleState<T>,
}

#[derive(Debug)]
enum HandleState<T> {
    Ready(Try<T>),
    Running(JoinHandle<Try<T>>),
}

impl<T: Send + 'static> AsyncHandle<T> {
    /// A handle that is already resolved.
    pub fn ready(outcome: Try<T>) -> Self {
        Self {
            state: HandleState::Ready(outcome),
        }
    }

    /// Run a blocking fallible computation on the blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self {
            state: HandleState::Running(tokio::task::spawn_blocking(move || Try::of(f))),
        }
    }

    /// Run a future as a task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Try<T>> + Send + 'static,
    {
        Self {
            state: HandleState::Running(tokio::spawn(future)),
        }
    }

    /// Returns true once the outcome is available without waiting.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Ready(_) => true,
            HandleState::Running(handle) => handle.is_finished(),
        }
    }

    /// Request cancellation of the backing task. No-op for a resolved handle.
    pub fn abort(&self) {
        if let HandleState::Running(handle) = &self.state {
            handle.abort();
        }
    }

    /// Wait for the outcome.
    pub async fn join(self) -> Try<T> {
        match self.state {
            HandleState::Ready(outcome) => outcome,
            HandleState::Running(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(err) => Try::Failure(join_failure(err)),
            },
        }
    }
}

fn join_failure(err: JoinError) -> TryError {
    if err.is_cancelled() {
        TryError::Cancelled
    } else if err.is_panic() {
        TryError::from_panic(err.into_panic())
    } else {
        TryError::TaskFailed {
            message: err.to_string(),
        }
    }
}

impl<T: Send + 'static> IntoFuture for AsyncHandle<T> {
    type Output = Try<T>;
    type IntoFuture = BoxFuture<'static, Try<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.join().boxed()
    }
}

/// Conversions from [`Try`] into async handles.
pub trait TryAsyncExt<T> {
    /// A pre-resolved handle; a failure becomes a pre-failed handle.
    fn to_async_handle(self) -> AsyncHandle<T>;
}

impl<T: Send + 'static> TryAsyncExt<T> for Try<T> {
    fn to_async_handle(self) -> AsyncHandle<T> {
        AsyncHandle::ready(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_to_async_handle_success_and_failure() {
        let handle = Try::success(5).to_async_handle();
        assert!(handle.is_finished());
        assert_eq!(handle.await, Try::Success(5));

        let handle = Try::<i32>::failure(TryError::NoMatch).to_async_handle();
        assert_eq!(handle.join().await.cause(), Some(&TryError::NoMatch));
    }

    #[tokio::test]
    async fn test_spawn_captures_error() {
        let handle = AsyncHandle::spawn(|| "nope".parse::<u32>());
        let outcome = handle.await;
        assert!(outcome.is_failure_of::<std::num::ParseIntError>());

        let handle = AsyncHandle::spawn(|| "17".parse::<u32>());
        assert_eq!(handle.await, Try::Success(17));
    }

    async fn explode() -> Try<i32> {
        panic!("worker died")
    }

    #[tokio::test]
    async fn test_spawn_future_panic_becomes_failure() {
        let handle = AsyncHandle::spawn_future(explode());
        let outcome = handle.await;
        assert_eq!(
            outcome.cause(),
            Some(&TryError::Panicked {
                message: "worker died".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_abort_resolves_to_cancelled() {
        let handle = AsyncHandle::spawn_future(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Try::success(1)
        });
        handle.abort();
        assert_eq!(handle.await.cause(), Some(&TryError::Cancelled));
    }
}
