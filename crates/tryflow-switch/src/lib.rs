//! # Tryflow Switch
//!
//! Ordered first-match dispatch over a single input, evaluated into a
//! [`Try`](tryflow_core::Try).

pub mod case;
pub mod matcher;

pub use case::{CaseKind, EvalMode};
pub use matcher::Switch;
