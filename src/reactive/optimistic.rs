//! Optimistic mutation: apply locally, confirm remotely, roll back on failure.

use crate::error::ApiError;
use crate::reactive::StateContainer;
use std::future::Future;

/// Apply `apply` to `container` right away, then await `remote`.
///
/// On success the local change stands and the remote result is returned. On
/// failure `revert` is applied to whatever the snapshot is by then (so it must
/// undo only the fields `apply` touched) and the error is returned.
///
/// `remote` is a not-yet-polled future: the request goes out only after the
/// local change is visible to subscribers.
pub async fn optimistic<T, A, R, Fut, O>(
    container: &StateContainer<T>,
    apply: A,
    revert: R,
    remote: Fut,
) -> Result<O, ApiError>
where
    T: Clone + Send + 'static,
    A: FnOnce(&T) -> T,
    R: FnOnce(&T) -> T,
    Fut: Future<Output = Result<O, ApiError>>,
{
    container.update(apply);
    match remote.await {
        Ok(out) => Ok(out),
        Err(err) => {
            tracing::debug!(error = %err, "optimistic update rolled back");
            container.update(revert);
            Err(err)
        }
    }
}
