//! Async retry with a pluggable wait between attempts.

use std::error::Error as StdError;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::debug;
use tryflow_core::{Result, RetryConfig, Try, TryError};

/// Wait between two retry attempts.
#[async_trait]
pub trait Backoff: Send + Sync {
    /// Pause for `delay`.
    ///
    /// Returns [`TryError::Interrupted`] if the wait was cut short; the retry
    /// loop then gives up without further attempts.
    async fn pause(&self, delay: Duration) -> Result<()>;
}

/// Cancellation flag shared between a retry loop and its owner.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Raise the flag and wake every waiter.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the flag is raised.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Backoff`] that sleeps on the tokio timer, optionally racing a
/// [`CancelSignal`].
#[derive(Debug, Clone, Default)]
pub struct TokioBackoff {
    cancel: Option<CancelSignal>,
}

impl TokioBackoff {
    /// Sleep without cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep until the delay elapses or `cancel` is raised.
    pub fn cancellable(cancel: CancelSignal) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }
}

#[async_trait]
impl Backoff for TokioBackoff {
    async fn pause(&self, delay: Duration) -> Result<()> {
        let Some(cancel) = &self.cancel else {
            tokio::time::sleep(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TryError::Interrupted),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

/// Retry an async computation until it succeeds or `config.max_attempts`
/// is reached, pausing through `backoff` between attempts.
///
/// Panics inside the computation are captured like errors. Cancellation is
/// only observed while pausing; an attempt in flight runs to completion.
pub async fn retry_async<T, E, F, Fut>(
    config: &RetryConfig,
    backoff: &dyn Backoff,
    mut supplier: F,
) -> Try<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: StdError + Send + Sync + 'static,
{
    if let Err(err) = config.validate() {
        return Try::Failure(err);
    }

    let mut attempt = 1;
    loop {
        let outcome = attempt_once(&mut supplier).await;
        if outcome.is_success() {
            debug!(attempt, "async retry succeeded");
            return outcome;
        }
        if attempt >= config.max_attempts {
            debug!(attempts = attempt, "async retry attempts exhausted");
            return outcome;
        }

        let delay = config.delay_for(attempt);
        debug!(
            attempt,
            max_attempts = config.max_attempts,
            ?delay,
            "async attempt failed, pausing before next attempt"
        );
        if let Err(err) = backoff.pause(delay).await {
            debug!(attempt, error = %err, "async retry interrupted");
            return Try::Failure(err);
        }
        attempt += 1;
    }
}

/// Run one attempt. A panic while building or polling the future becomes a
/// failure.
async fn attempt_once<T, E, F, Fut>(supplier: &mut F) -> Try<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: StdError + Send + Sync + 'static,
{
    let future = match std::panic::catch_unwind(AssertUnwindSafe(|| supplier())) {
        Ok(future) => future,
        Err(payload) => return Try::Failure(TryError::from_panic(payload)),
    };
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => Try::from_result(result),
        Err(payload) => Try::Failure(TryError::from_panic(payload)),
    }
}
