//! Collection-level helpers over [`Try`].

use crate::outcome::Try;

/// Turn a collection of `Try` into a `Try` of the collected values.
///
/// Short-circuits on the first failure in iteration order; items after it
/// are never pulled from the iterator.
pub fn sequence<T, I>(items: I) -> Try<Vec<T>>
where
    I: IntoIterator<Item = Try<T>>,
{
    items.into_iter().collect()
}

/// Apply `f` to each element (with `map` semantics) and sequence the results.
///
/// `f` is not invoked for elements after the first failure.
pub fn traverse<A, B, I, F>(items: I, mut f: F) -> Try<Vec<B>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> B,
{
    items
        .into_iter()
        .map(|item| Try::supply(|| f(item)))
        .collect()
}

/// Like [`traverse`] for a function that already returns a `Try`.
pub fn traverse_try<A, B, I, F>(items: I, mut f: F) -> Try<Vec<B>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Try<B>,
{
    items
        .into_iter()
        .map(|item| Try::success(item).flat_map(&mut f))
        .collect()
}
