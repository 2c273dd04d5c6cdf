//! Guarded cases and evaluation modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tryflow_core::Try;

/// Guard test applied to the switch input.
pub(crate) type Guard<'a, I> = Box<dyn Fn(&I) -> bool + 'a>;

/// Producer invoked when its guard accepts the input.
pub(crate) type Producer<'a, I, R> = Box<dyn Fn(&I) -> Try<R> + 'a>;

/// Kind of guard a case was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Input equals a given value.
    Value,
    /// Input equals one of several values.
    OneOf,
    /// Input holds a given concrete type.
    Type,
    /// Input is absent.
    Null,
    /// Input is present.
    Present,
    /// Arbitrary predicate.
    Predicate,
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaseKind::Value => "value",
            CaseKind::OneOf => "one_of",
            CaseKind::Type => "type",
            CaseKind::Null => "null",
            CaseKind::Present => "present",
            CaseKind::Predicate => "predicate",
        };
        f.write_str(name)
    }
}

/// How repeated [`Switch::get`](crate::Switch::get) calls behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvalMode {
    /// Every call re-runs the guards and the selected producer.
    #[default]
    Rerun,
    /// The first outcome is cached on the switch and returned afterwards.
    Memoize,
}

/// One guard plus the producer it selects.
pub(crate) struct Case<'a, I, R> {
    pub(crate) kind: CaseKind,
    pub(crate) guard: Guard<'a, I>,
    pub(crate) producer: Producer<'a, I, R>,
}

impl<'a, I, R> Case<'a, I, R> {
    pub(crate) fn new(kind: CaseKind, guard: Guard<'a, I>, producer: Producer<'a, I, R>) -> Self {
        Self {
            kind,
            guard,
            producer,
        }
    }

    pub(crate) fn accepts(&self, input: &I) -> bool {
        (self.guard)(input)
    }
}
