//! Conditional dispatch helpers.
//!
//! Functional replacements for `if`/early-return branching over caller
//! supplied closures. These helpers only choose a branch: a panic raised
//! inside a closure propagates to the caller untouched.

/// Runs `action` when `condition` is true.
pub fn run_if_true<F>(condition: bool, action: F)
where
    F: FnOnce(),
{
    if condition {
        action();
    }
}

/// Runs `action` when `condition` is false.
pub fn run_if_false<F>(condition: bool, action: F)
where
    F: FnOnce(),
{
    if !condition {
        action();
    }
}

/// Runs exactly one of the two actions.
pub fn run_either<T, F>(condition: bool, when_true: T, when_false: F)
where
    T: FnOnce(),
    F: FnOnce(),
{
    if condition {
        when_true()
    } else {
        when_false()
    }
}

/// Returns the supplier's value when `condition` is true, `None` otherwise.
pub fn supply_if_true<T, S>(condition: bool, supplier: S) -> Option<T>
where
    S: FnOnce() -> T,
{
    condition.then(supplier)
}

/// Returns the supplier's value when `condition` is false, `None` otherwise.
pub fn supply_if_false<T, S>(condition: bool, supplier: S) -> Option<T>
where
    S: FnOnce() -> T,
{
    (!condition).then(supplier)
}

/// Invokes exactly one supplier and returns its value.
pub fn select_by_supplier<T, A, B>(condition: bool, when_true: A, when_false: B) -> T
where
    A: FnOnce() -> T,
    B: FnOnce() -> T,
{
    if condition {
        when_true()
    } else {
        when_false()
    }
}

/// Fails with the supplied error when `condition` is true.
///
/// The error supplier is only invoked on the failing branch.
///
/// ```
/// use tryflow_core::conditional::throw_if_true;
///
/// fn check(input: i64) -> Result<(), String> {
///     throw_if_true(input < 0, || "negative".to_string())
/// }
///
/// assert_eq!(check(-1), Err("negative".to_string()));
/// assert_eq!(check(5), Ok(()));
/// ```
pub fn throw_if_true<E, S>(condition: bool, error_supplier: S) -> Result<(), E>
where
    S: FnOnce() -> E,
{
    if condition {
        Err(error_supplier())
    } else {
        Ok(())
    }
}

/// Fails with the supplied error when `condition` is false.
pub fn throw_if_false<E, S>(condition: bool, error_supplier: S) -> Result<(), E>
where
    S: FnOnce() -> E,
{
    throw_if_true(!condition, error_supplier)
}

/// Unwraps `value` or fails with the supplied error.
pub fn require_some<T, E, S>(value: Option<T>, error_supplier: S) -> Result<T, E>
where
    S: FnOnce() -> E,
{
    value.ok_or_else(error_supplier)
}

/// Returns the supplier's optional when `condition` is true.
///
/// An absent value from the supplier collapses to `None`, same as the false
/// branch.
pub fn to_option_if_true<T, S>(condition: bool, supplier: S) -> Option<T>
where
    S: FnOnce() -> Option<T>,
{
    if condition {
        supplier()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TryError;
    use std::cell::Cell;

    #[test]
    fn test_run_polarity() {
        let hits = Cell::new(0);
        run_if_true(true, || hits.set(hits.get() + 1));
        run_if_true(false, || hits.set(hits.get() + 10));
        run_if_false(false, || hits.set(hits.get() + 100));
        run_if_false(true, || hits.set(hits.get() + 1000));
        assert_eq!(hits.get(), 101);
    }

    #[test]
    fn test_run_either() {
        let side = Cell::new("");
        run_either(false, || side.set("true"), || side.set("false"));
        assert_eq!(side.get(), "false");
    }

    #[test]
    fn test_supply_if() {
        assert_eq!(supply_if_true(true, || 7), Some(7));
        assert_eq!(supply_if_true(false, || 7), None);
        assert_eq!(supply_if_false(false, || 7), Some(7));
        assert_eq!(supply_if_false(true, || 7), None);
    }

    #[test]
    fn test_select_invokes_exactly_one() {
        let calls = Cell::new(0);
        let value = select_by_supplier(
            true,
            || {
                calls.set(calls.get() + 1);
                "yes"
            },
            || {
                calls.set(calls.get() + 1);
                "no"
            },
        );
        assert_eq!(value, "yes");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_throw_if_true_negative_input() {
        let input = -1;
        let result = throw_if_true(input < 0, || TryError::validation("negative"));
        assert_eq!(result, Err(TryError::validation("negative")));
    }

    #[test]
    fn test_throw_if_true_is_noop_for_valid_input() {
        let invoked = Cell::new(false);
        let input = 5;
        let result = throw_if_true(input < 0, || {
            invoked.set(true);
            TryError::validation("negative")
        });
        assert_eq!(result, Ok(()));
        assert!(!invoked.get());
    }

    #[test]
    fn test_throw_if_false_and_require_some() {
        assert!(throw_if_false(false, || "zero divisor").is_err());
        assert_eq!(require_some(Some(3), || "missing"), Ok(3));
        assert_eq!(require_some::<i32, _, _>(None, || "missing"), Err("missing"));
    }

    #[test]
    fn test_to_option_if_true_collapses_absent() {
        assert_eq!(to_option_if_true(true, || Some(1)), Some(1));
        assert_eq!(to_option_if_true::<i32, _>(true, || None), None);
        assert_eq!(to_option_if_true(false, || Some(1)), None);
    }

    #[test]
    #[should_panic(expected = "closure failure")]
    fn test_panics_propagate() {
        run_if_true(true, || panic!("closure failure"));
    }
}
