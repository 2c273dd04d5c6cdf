//! The [`Try`] result type.
//!
//! A `Try<T>` is the outcome of a fallible computation: either a success
//! value or a [`TryError`]. Every transformation consumes the receiver and
//! returns a new `Try`; closures that panic inside `map`, `flat_map`,
//! `filter` or `recover` turn into failures instead of unwinding past the
//! call site.

use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

use crate::error::TryError;

/// Outcome of a fallible computation.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a Try may hold a failure that should be handled"]
pub enum Try<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation failed.
    Failure(TryError),
}

/// Runs `f`, converting a panic into a failure.
fn guarded<T, F>(f: F) -> Try<T>
where
    F: FnOnce() -> Try<T>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Try::Failure(TryError::from_panic(payload)))
}

impl<T> Try<T> {
    /// Run a fallible computation and capture its outcome.
    ///
    /// Both a returned error and a panic are captured; this never unwinds.
    ///
    /// ```
    /// use tryflow_core::Try;
    ///
    /// let parsed = Try::of(|| "42".parse::<i32>());
    /// assert_eq!(parsed.get_or_else(0), 42);
    ///
    /// let broken = Try::of(|| "forty-two".parse::<i32>());
    /// assert!(broken.is_failure_of::<std::num::ParseIntError>());
    /// ```
    pub fn of<F, E>(f: F) -> Self
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: StdError + Send + Sync + 'static,
    {
        guarded(|| Try::from_result(f()))
    }

    /// Run an infallible computation, capturing a panic as a failure.
    pub fn supply<F>(f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        guarded(|| Try::Success(f()))
    }

    /// Wrap a success value.
    pub fn success(value: T) -> Self {
        Try::Success(value)
    }

    /// Wrap a known failure.
    pub fn failure(error: impl Into<TryError>) -> Self {
        Try::Failure(error.into())
    }

    /// Convert a `Result`, capturing its error.
    pub fn from_result<E>(result: std::result::Result<T, E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Try::Success(value),
            Err(err) => Try::Failure(TryError::capture(err)),
        }
    }

    /// Convert an optional; an absent value becomes [`TryError::MissingValue`].
    pub fn from_option(value: Option<T>) -> Self {
        Self::from_option_or(value, || TryError::MissingValue)
    }

    /// Convert an optional; an absent value becomes the supplied error.
    pub fn from_option_or<E, S>(value: Option<T>, error_supplier: S) -> Self
    where
        S: FnOnce() -> E,
        E: Into<TryError>,
    {
        match value {
            Some(value) => Try::Success(value),
            None => Try::Failure(error_supplier().into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Try::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Try::Failure(_))
    }

    /// Returns true if this is a failure whose captured error is of type `E`.
    pub fn is_failure_of<E>(&self) -> bool
    where
        E: StdError + Send + Sync + 'static,
    {
        match self {
            Try::Failure(err) => err.is::<E>(),
            Try::Success(_) => false,
        }
    }

    /// Returns true only for a success whose value satisfies `predicate`.
    pub fn matches<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Try::Success(value) => predicate(value),
            Try::Failure(_) => false,
        }
    }

    /// Borrow the success value.
    pub fn value(&self) -> Option<&T> {
        match self {
            Try::Success(value) => Some(value),
            Try::Failure(_) => None,
        }
    }

    /// Borrow the failure cause.
    pub fn cause(&self) -> Option<&TryError> {
        match self {
            Try::Success(_) => None,
            Try::Failure(err) => Some(err),
        }
    }

    /// Returns the success value or `fallback`.
    pub fn get_or_else(self, fallback: T) -> T {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => fallback,
        }
    }

    /// Returns the success value or computes a fallback.
    pub fn get_or_else_with<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => fallback(),
        }
    }

    /// Returns the success value or the caller-constructed error.
    pub fn or_else_throw<E, S>(self, error_supplier: S) -> std::result::Result<T, E>
    where
        S: FnOnce() -> E,
    {
        match self {
            Try::Success(value) => Ok(value),
            Try::Failure(_) => Err(error_supplier()),
        }
    }

    /// Returns the success value or the originally captured error, unwrapped.
    pub fn or_throw(self) -> crate::Result<T> {
        match self {
            Try::Success(value) => Ok(value),
            Try::Failure(err) => Err(err),
        }
    }

    /// Transform the success value. A failure passes through and `f` is not
    /// invoked.
    pub fn map<U, F>(self, f: F) -> Try<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Try::Success(value) => Try::supply(|| f(value)),
            Try::Failure(err) => Try::Failure(err),
        }
    }

    /// Transform the success value with a fallible function.
    pub fn try_map<U, E, F>(self, f: F) -> Try<U>
    where
        F: FnOnce(T) -> std::result::Result<U, E>,
        E: StdError + Send + Sync + 'static,
    {
        match self {
            Try::Success(value) => Try::of(|| f(value)),
            Try::Failure(err) => Try::Failure(err),
        }
    }

    /// Chain a computation that itself returns a `Try`.
    pub fn flat_map<U, F>(self, f: F) -> Try<U>
    where
        F: FnOnce(T) -> Try<U>,
    {
        match self {
            Try::Success(value) => guarded(|| f(value)),
            Try::Failure(err) => Try::Failure(err),
        }
    }

    /// Turn a failure into a success computed from its cause.
    pub fn recover<F>(self, f: F) -> Self
    where
        F: FnOnce(TryError) -> T,
    {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(err) => Try::supply(|| f(err)),
        }
    }

    /// Replace a failure with the `Try` computed from its cause.
    pub fn recover_with<F>(self, f: F) -> Self
    where
        F: FnOnce(TryError) -> Try<T>,
    {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(err) => guarded(|| f(err)),
        }
    }

    /// Rewrite the failure cause.
    pub fn map_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(TryError) -> TryError,
    {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(err) => guarded(|| Try::Failure(f(err))),
        }
    }

    /// Fail with `error` when the success value does not satisfy `predicate`.
    pub fn filter<P>(self, predicate: P, error: impl Into<TryError>) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Try::Success(value) => {
                match panic::catch_unwind(AssertUnwindSafe(|| predicate(&value))) {
                    Ok(true) => Try::Success(value),
                    Ok(false) => Try::Failure(error.into()),
                    Err(payload) => Try::Failure(TryError::from_panic(payload)),
                }
            }
            Try::Failure(err) => Try::Failure(err),
        }
    }

    /// Like [`Try::filter`], failing with [`TryError::Filtered`].
    pub fn filter_message<P>(self, predicate: P, message: impl Into<String>) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter(predicate, TryError::filtered(message))
    }

    /// Collapse into a plain value; exactly one branch runs.
    pub fn fold<U, FF, FS>(self, on_failure: FF, on_success: FS) -> U
    where
        FF: FnOnce(TryError) -> U,
        FS: FnOnce(T) -> U,
    {
        match self {
            Try::Success(value) => on_success(value),
            Try::Failure(err) => on_failure(err),
        }
    }

    /// Observe the success value. A panic in `consumer` propagates.
    pub fn on_success<F>(self, consumer: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Try::Success(value) = &self {
            consumer(value);
        }
        self
    }

    /// Observe the failure cause. A panic in `consumer` is swallowed.
    pub fn on_failure<F>(self, consumer: F) -> Self
    where
        F: FnOnce(&TryError),
    {
        if let Try::Failure(err) = &self {
            let _ = panic::catch_unwind(AssertUnwindSafe(|| consumer(err)));
        }
        self
    }

    /// Observe completion in either state. A panic in `action` is swallowed.
    pub fn on_complete<F>(self, action: F) -> Self
    where
        F: FnOnce(&Try<T>),
    {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| action(&self)));
        self
    }

    /// Success value as an optional; a failure becomes `None`.
    pub fn to_option(self) -> Option<T> {
        match self {
            Try::Success(value) => Some(value),
            Try::Failure(_) => None,
        }
    }

    /// Success value as a one-element list; a failure becomes empty.
    pub fn to_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T, E> From<std::result::Result<T, E>> for Try<T>
where
    E: StdError + Send + Sync + 'static,
{
    fn from(result: std::result::Result<T, E>) -> Self {
        Try::from_result(result)
    }
}

impl<T> From<Try<T>> for std::result::Result<T, TryError> {
    fn from(value: Try<T>) -> Self {
        value.or_throw()
    }
}

impl<T> IntoIterator for Try<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_option().into_iter()
    }
}

/// Collects successes, stopping at the first failure.
///
/// Elements after the first failure are not pulled from the iterator.
impl<T, C> FromIterator<Try<T>> for Try<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Try<T>>>(iter: I) -> Self {
        let mut failure = None;
        let collected: C = iter
            .into_iter()
            .map_while(|item| match item {
                Try::Success(value) => Some(value),
                Try::Failure(err) => {
                    failure = Some(err);
                    None
                }
            })
            .collect();

        match failure {
            Some(err) => Try::Failure(err),
            None => Try::Success(collected),
        }
    }
}
