//! Two-step commits with compensation.
//!
//! The backend has no multi-key transaction, so operations touching two
//! collections write them in sequence and undo the first write when the
//! second one fails.

use std::future::Future;

use tracing::{error, warn};

use crate::error::StoreError;

/// Runs `first`, then `second`. When `second` fails, `rollback` is awaited
/// to restore what `first` wrote and the error from `second` is returned.
///
/// Futures are lazy, so `second` and `rollback` do nothing unless reached.
pub(crate) async fn commit_pair<F, S, R>(
    first: F,
    second: S,
    rollback: R,
) -> Result<(), StoreError>
where
    F: Future<Output = Result<(), StoreError>>,
    S: Future<Output = Result<(), StoreError>>,
    R: Future<Output = Result<(), StoreError>>,
{
    first.await?;

    if let Err(err) = second.await {
        match rollback.await {
            Ok(()) => warn!(error = %err, "second write failed, first write rolled back"),
            Err(rollback_err) => error!(
                error = %err,
                rollback_error = %rollback_err,
                "second write failed and rollback failed, collections disagree"
            ),
        }
        return Err(err);
    }

    Ok(())
}
