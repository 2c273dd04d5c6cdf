//! Loop replacements.
//!
//! A [`RangeLoop`] owns its own bounds and step, so concurrent callers never
//! share counters.

use crate::conditional::throw_if_true;
use crate::error::{Result, TryError};
use crate::outcome::Try;

/// Builder for iterating over an integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLoop {
    start: i64,
    end: i64,
    step: i64,
    inclusive: bool,
}

impl RangeLoop {
    /// Half-open range `start..end` with step 1 (or -1 when `end < start`).
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            step: if end < start { -1 } else { 1 },
            inclusive: false,
        }
    }

    /// Set the step. Its sign decides the direction.
    pub fn step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Include `end` in the range.
    pub fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self
    }

    fn validate(&self) -> Result<()> {
        throw_if_true(self.step == 0, || TryError::validation("step must not be zero"))
    }

    /// Values visited by this loop.
    pub fn values(&self) -> Result<impl Iterator<Item = i64>> {
        self.validate()?;
        let Self {
            start,
            end,
            step,
            inclusive,
        } = *self;

        let mut next = Some(start);
        Ok(std::iter::from_fn(move || {
            let current = next?;
            let in_range = match (step > 0, inclusive) {
                (true, false) => current < end,
                (true, true) => current <= end,
                (false, false) => current > end,
                (false, true) => current >= end,
            };
            if !in_range {
                next = None;
                return None;
            }
            next = current.checked_add(step);
            Some(current)
        }))
    }

    /// Run `action` for every value.
    pub fn for_each<F>(&self, action: F) -> Result<()>
    where
        F: FnMut(i64),
    {
        self.values()?.for_each(action);
        Ok(())
    }

    /// Collect `f` applied to every value.
    pub fn map<R, F>(&self, f: F) -> Result<Vec<R>>
    where
        F: FnMut(i64) -> R,
    {
        Ok(self.values()?.map(f).collect())
    }

    /// Run a fallible `action` for every value, stopping at the first failure.
    pub fn try_for_each<F>(&self, mut action: F) -> Try<()>
    where
        F: FnMut(i64) -> Try<()>,
    {
        let values = match self.values() {
            Ok(values) => values,
            Err(err) => return Try::Failure(err),
        };
        for value in values {
            if let Try::Failure(err) = action(value) {
                return Try::Failure(err);
            }
        }
        Try::Success(())
    }
}

/// Run `action` `count` times, passing the zero-based iteration index.
pub fn times<F>(count: usize, action: F)
where
    F: FnMut(usize),
{
    (0..count).for_each(action);
}

/// Run `action` while `condition` holds. Returns the number of iterations.
pub fn repeat_while<C, F>(mut condition: C, mut action: F) -> usize
where
    C: FnMut() -> bool,
    F: FnMut(),
{
    let mut iterations = 0;
    while condition() {
        action();
        iterations += 1;
    }
    iterations
}
