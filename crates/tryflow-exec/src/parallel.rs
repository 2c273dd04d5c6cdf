//! Running independent computations on the blocking pool.

use std::error::Error as StdError;

use futures::future::join_all;
use tracing::debug;
use tryflow_core::{sequence, Try};

use crate::handle::AsyncHandle;

/// Submit every task and wait for all of them.
///
/// Tasks run concurrently; the caller only waits at the join point. Results
/// keep submission order.
pub async fn parallel<T, E, F>(tasks: Vec<F>) -> Vec<Try<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
    E: StdError + Send + Sync + 'static,
{
    let handles: Vec<AsyncHandle<T>> = tasks.into_iter().map(AsyncHandle::spawn).collect();
    debug!(tasks = handles.len(), "submitted parallel tasks");

    let outcomes = join_all(handles.into_iter().map(AsyncHandle::join)).await;
    debug!(
        failures = outcomes.iter().filter(|outcome| outcome.is_failure()).count(),
        "parallel tasks joined"
    );
    outcomes
}

/// Like [`parallel`], combining the outcomes with [`sequence`].
///
/// All tasks run to completion; the first failure in submission order wins.
pub async fn parallel_sequence<T, E, F>(tasks: Vec<F>) -> Try<Vec<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
    E: StdError + Send + Sync + 'static,
{
    sequence(parallel(tasks).await)
}
