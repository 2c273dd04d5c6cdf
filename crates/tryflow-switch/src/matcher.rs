//! The [`Switch`] builder.

use std::any::Any;
use std::cell::OnceCell;
use std::error::Error as StdError;
use std::fmt;

use tracing::{debug, trace};
use tryflow_core::{Try, TryError};

use crate::case::{Case, CaseKind, EvalMode, Producer};

/// Ordered first-match dispatch over a single input value.
///
/// Cases are tested in registration order and the first accepting guard
/// fires; there is no fallthrough. The default producer runs only when no
/// case matched, wherever it was registered. Without a default, an
/// unmatched input evaluates to [`TryError::NoMatch`].
///
/// ```
/// use tryflow_switch::Switch;
///
/// let label = Switch::on(7)
///     .case_value(0, |_| "zero")
///     .case_when(|n: &i32| n % 2 == 1, |_| "odd")
///     .default(|_| "even")
///     .evaluate();
/// assert_eq!(label.get_or_else("?"), "odd");
/// ```
pub struct Switch<'a, I, R> {
    input: I,
    cases: Vec<Case<'a, I, R>>,
    default: Option<Producer<'a, I, R>>,
    mode: EvalMode,
    cached: OnceCell<Try<R>>,
}

impl<'a, I: 'a, R: 'a> Switch<'a, I, R> {
    /// Start a switch over `input`.
    pub fn on(input: I) -> Self {
        Self {
            input,
            cases: Vec::new(),
            default: None,
            mode: EvalMode::default(),
            cached: OnceCell::new(),
        }
    }

    /// Set how repeated [`Switch::get`] calls behave.
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cache the first outcome.
    pub fn memoized(self) -> Self {
        self.mode(EvalMode::Memoize)
    }

    fn push<G, P>(mut self, kind: CaseKind, guard: G, producer: P) -> Self
    where
        G: Fn(&I) -> bool + 'a,
        P: Fn(&I) -> Try<R> + 'a,
    {
        self.cases
            .push(Case::new(kind, Box::new(guard), Box::new(producer)));
        self
    }

    /// Add a case guarded by an arbitrary predicate.
    pub fn case_when<P, F>(self, predicate: P, producer: F) -> Self
    where
        P: Fn(&I) -> bool + 'a,
        F: Fn(&I) -> R + 'a,
    {
        self.push(CaseKind::Predicate, predicate, move |input| {
            Try::success(producer(input))
        })
    }

    /// Add a predicate case whose producer may fail.
    pub fn case_when_try<P, F, E>(self, predicate: P, producer: F) -> Self
    where
        P: Fn(&I) -> bool + 'a,
        F: Fn(&I) -> Result<R, E> + 'a,
        E: StdError + Send + Sync + 'static,
    {
        self.push(CaseKind::Predicate, predicate, move |input| {
            Try::from_result(producer(input))
        })
    }

    /// Add a case matching inputs equal to `value`.
    pub fn case_value<F>(self, value: I, producer: F) -> Self
    where
        I: PartialEq,
        F: Fn(&I) -> R + 'a,
    {
        self.push(
            CaseKind::Value,
            move |input| *input == value,
            move |input| Try::success(producer(input)),
        )
    }

    /// Add an equality case whose producer may fail.
    pub fn case_value_try<F, E>(self, value: I, producer: F) -> Self
    where
        I: PartialEq,
        F: Fn(&I) -> Result<R, E> + 'a,
        E: StdError + Send + Sync + 'static,
    {
        self.push(
            CaseKind::Value,
            move |input| *input == value,
            move |input| Try::from_result(producer(input)),
        )
    }

    /// Add a case matching inputs equal to any of `values`.
    pub fn case_one_of<F>(self, values: Vec<I>, producer: F) -> Self
    where
        I: PartialEq,
        F: Fn(&I) -> R + 'a,
    {
        self.push(
            CaseKind::OneOf,
            move |input| values.contains(input),
            move |input| Try::success(producer(input)),
        )
    }

    /// Set the producer used when no case matches.
    ///
    /// Registering a second default replaces the first.
    pub fn default<F>(mut self, producer: F) -> Self
    where
        F: Fn(&I) -> R + 'a,
    {
        self.default = Some(Box::new(move |input: &I| Try::success(producer(input))));
        self
    }

    /// The value cases are tested against.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Number of registered cases, not counting the default.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Evaluate once, consuming the switch.
    ///
    /// A memoized outcome from an earlier [`Switch::get`] is returned as is.
    pub fn evaluate(mut self) -> Try<R> {
        match self.cached.take() {
            Some(outcome) => outcome,
            None => self.run(),
        }
    }

    /// Evaluate without consuming the switch; see [`EvalMode`].
    pub fn get(&self) -> Try<R>
    where
        R: Clone,
    {
        match self.mode {
            EvalMode::Rerun => self.run(),
            EvalMode::Memoize => self.cached.get_or_init(|| self.run()).clone(),
        }
    }

    fn select(&self) -> Option<&Producer<'a, I, R>> {
        let matched = self
            .cases
            .iter()
            .enumerate()
            .find(|(_, case)| case.accepts(&self.input));

        match matched {
            Some((index, case)) => {
                trace!(index, kind = %case.kind, "switch case matched");
                Some(&case.producer)
            }
            None => {
                trace!(cases = self.cases.len(), "no switch case matched");
                self.default.as_ref()
            }
        }
    }

    fn run(&self) -> Try<R> {
        Try::supply(|| self.select()).flat_map(|selected| match selected {
            Some(producer) => producer(&self.input),
            None => {
                debug!(cases = self.cases.len(), "switch is not exhaustive for input");
                Try::failure(TryError::NoMatch)
            }
        })
    }
}

impl<'a, T: 'a, R: 'a> Switch<'a, Option<T>, R> {
    /// Add a case matching an absent input.
    pub fn case_none<F>(self, producer: F) -> Self
    where
        F: Fn() -> R + 'a,
    {
        self.push(CaseKind::Null, Option::<T>::is_none, move |_| {
            Try::success(producer())
        })
    }

    /// Add a case matching a present input; the producer receives the value.
    pub fn case_some<F>(self, producer: F) -> Self
    where
        F: Fn(&T) -> R + 'a,
    {
        self.push(CaseKind::Present, Option::<T>::is_some, move |input| {
            Try::from_option(input.as_ref().map(&producer))
        })
    }
}

impl<'a, R: 'a> Switch<'a, Box<dyn Any>, R> {
    /// Add a case matching inputs whose concrete type is `X`.
    pub fn case_type<X, F>(self, producer: F) -> Self
    where
        X: Any,
        F: Fn(&X) -> R + 'a,
    {
        self.push(
            CaseKind::Type,
            |input: &Box<dyn Any>| (**input).is::<X>(),
            move |input: &Box<dyn Any>| {
                Try::from_option((**input).downcast_ref::<X>().map(&producer))
            },
        )
    }
}

impl<I: fmt::Debug, R> fmt::Debug for Switch<'_, I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<CaseKind> = self.cases.iter().map(|case| case.kind).collect();
        f.debug_struct("Switch")
            .field("input", &self.input)
            .field("cases", &kinds)
            .field("has_default", &self.default.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}
