//! # Tryflow Exec
//!
//! Hands [`Try`](tryflow_core::Try) computations to the tokio runtime.
//!
//! - [`AsyncHandle`] - Pre-resolved or spawned computation
//! - [`parallel`] - Independent computations joined in submission order
//! - [`retry_async`] - Async retry with a pluggable, cancellable [`Backoff`]

pub mod handle;
pub mod parallel;
pub mod retry;

pub use handle::{AsyncHandle, TryAsyncExt};
pub use parallel::{parallel, parallel_sequence};
pub use retry::{retry_async, Backoff, CancelSignal, TokioBackoff};
