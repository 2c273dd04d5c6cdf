//! # Tryflow
//!
//! Fluent result combinators, conditional dispatch and first-match switching.
//!
//! ```
//! use tryflow::prelude::*;
//!
//! let port = Try::of(|| "8080".parse::<u16>())
//!     .filter(|port| *port >= 1024, "privileged port")
//!     .recover(|_| 8000)
//!     .get_or_else(0);
//! assert_eq!(port, 8080);
//! ```

pub use tryflow_core::{
    collect, conditional, error, looping, outcome, retry, sequence, traverse, traverse_try,
    BackoffStrategy, CapturedError, Interrupt, RangeLoop, Result, RetryConfig, Try, TryError,
};
pub use tryflow_exec::{
    handle, parallel, parallel_sequence, retry_async, AsyncHandle, Backoff, CancelSignal,
    TokioBackoff, TryAsyncExt,
};
pub use tryflow_switch::{case, matcher, CaseKind, EvalMode, Switch};

/// Prelude module for common imports.
pub mod prelude {
    pub use tryflow_core::prelude::*;
    pub use tryflow_exec::{AsyncHandle, TryAsyncExt};
    pub use tryflow_switch::{EvalMode, Switch};
}
