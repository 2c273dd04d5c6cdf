//! # Tryflow Core
//!
//! Core primitives for composing fallible computations.
//!
//! This crate provides the fundamental building blocks:
//! - [`Try`] - Success-or-failure outcome with a fluent combinator algebra
//! - [`TryError`] - The single failure payload type
//! - [`conditional`] - Functional replacements for `if`/early-return branching
//! - [`retry`] - Blocking retry with fixed or exponential delays
//! - [`looping`] - Loop replacements with per-instance configuration

pub mod collect;
pub mod conditional;
pub mod error;
pub mod looping;
pub mod outcome;
pub mod retry;

// Re-exports for convenience
pub use collect::{sequence, traverse, traverse_try};
pub use error::{CapturedError, Result, TryError};
pub use looping::RangeLoop;
pub use outcome::Try;
pub use retry::{BackoffStrategy, Interrupt, RetryConfig};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::collect::{sequence, traverse, traverse_try};
    pub use crate::conditional::{
        run_either, run_if_false, run_if_true, select_by_supplier, supply_if_false,
        supply_if_true, throw_if_false, throw_if_true, to_option_if_true,
    };
    pub use crate::error::TryError;
    pub use crate::outcome::Try;
    pub use crate::retry::{retry, retry_interruptible, retry_with_backoff, Interrupt, RetryConfig};
}
