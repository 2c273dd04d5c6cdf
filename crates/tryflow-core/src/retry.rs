//! Blocking retry with fixed or exponential delays.

use std::error::Error as StdError;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conditional::throw_if_true;
use crate::error::{Result, TryError};
use crate::outcome::Try;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Same delay before every retry.
    #[default]
    Fixed,
    /// Delay doubles after every failed attempt.
    Exponential,
}

/// Configuration for retrying a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds.
    pub delay_ms: u64,

    /// Delay growth strategy.
    pub strategy: BackoffStrategy,

    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 100,
            strategy: BackoffStrategy::Fixed,
            max_delay_ms: None,
        }
    }
}

impl RetryConfig {
    /// Retry with the same delay between attempts.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: duration_ms(delay),
            strategy: BackoffStrategy::Fixed,
            max_delay_ms: None,
        }
    }

    /// Retry with a delay that doubles after each failure.
    pub fn exponential(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            strategy: BackoffStrategy::Exponential,
            ..Self::fixed(max_attempts, initial_delay)
        }
    }

    /// Cap every delay at `max_delay`.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay_ms = Some(duration_ms(max_delay));
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        throw_if_true(self.max_attempts == 0, || {
            TryError::validation("max_attempts must be at least 1")
        })?;
        throw_if_true(
            self.max_delay_ms.is_some_and(|max| max < self.delay_ms),
            || TryError::validation("max_delay_ms must not be below delay_ms"),
        )
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = match self.strategy {
            BackoffStrategy::Fixed => self.delay_ms,
            BackoffStrategy::Exponential => {
                let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
                self.delay_ms.saturating_mul(factor)
            }
        };
        let capped = self.max_delay_ms.map_or(base, |max| base.min(max));
        Duration::from_millis(capped)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Interruption flag for a thread blocked between retry attempts.
///
/// Clones share the same flag. Once raised it stays raised until
/// [`Interrupt::reset`].
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag and wake every waiter.
    pub fn interrupt(&self) {
        let (lock, signal) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        signal.notify_all();
    }

    pub fn is_interrupted(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lower the flag.
    pub fn reset(&self) {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    /// Block for `delay`. Returns true if interrupted before it elapsed.
    pub fn wait(&self, delay: Duration) -> bool {
        let (lock, signal) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if delay.is_zero() {
            return *guard;
        }
        let (guard, _) = signal
            .wait_timeout_while(guard, delay, |interrupted| !*interrupted)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Retry `supplier` until it succeeds or `config.max_attempts` is reached.
///
/// Returns the first success or the last failure.
///
/// ```
/// use std::time::Duration;
/// use tryflow_core::retry::{retry, RetryConfig};
///
/// let mut calls = 0;
/// let result = retry(&RetryConfig::fixed(3, Duration::ZERO), || {
///     calls += 1;
///     if calls < 2 { "x".parse::<i32>() } else { "2".parse::<i32>() }
/// });
/// assert_eq!(result.get_or_else(0), 2);
/// assert_eq!(calls, 2);
/// ```
pub fn retry<T, E, F>(config: &RetryConfig, supplier: F) -> Try<T>
where
    F: FnMut() -> std::result::Result<T, E>,
    E: StdError + Send + Sync + 'static,
{
    retry_interruptible(config, &Interrupt::new(), supplier)
}

/// Retry with exponentially doubling delays starting at `initial_delay`.
pub fn retry_with_backoff<T, E, F>(max_attempts: u32, initial_delay: Duration, supplier: F) -> Try<T>
where
    F: FnMut() -> std::result::Result<T, E>,
    E: StdError + Send + Sync + 'static,
{
    retry(&RetryConfig::exponential(max_attempts, initial_delay), supplier)
}

/// Like [`retry`], waiting on `interrupt` between attempts.
///
/// If the flag is raised during a wait, the remaining attempts are
/// abandoned and [`TryError::Interrupted`] is returned.
pub fn retry_interruptible<T, E, F>(
    config: &RetryConfig,
    interrupt: &Interrupt,
    mut supplier: F,
) -> Try<T>
where
    F: FnMut() -> std::result::Result<T, E>,
    E: StdError + Send + Sync + 'static,
{
    if let Err(err) = config.validate() {
        return Try::Failure(err);
    }

    let mut attempt = 1;
    loop {
        let outcome = Try::of(&mut supplier);
        if outcome.is_success() {
            debug!(attempt, "retry succeeded");
            return outcome;
        }
        if attempt >= config.max_attempts {
            debug!(attempts = attempt, "retry attempts exhausted");
            return outcome;
        }

        let delay = config.delay_for(attempt);
        debug!(
            attempt,
            max_attempts = config.max_attempts,
            delay_ms = duration_ms(delay),
            "attempt failed, waiting before next attempt"
        );
        if interrupt.wait(delay) {
            debug!(attempt, "retry interrupted");
            return Try::Failure(TryError::Interrupted);
        }
        attempt += 1;
    }
}
