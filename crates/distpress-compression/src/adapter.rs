// distpress - Pre-compressed static build output
// Copyright (C) 2025 distpress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Execution adapter: one awaitable operation per routine invocation
//!
//! Routines report through a completion callback. [`run`] turns that into a
//! future that settles exactly once, either with the routine's failure as-is
//! or with the result normalized to [`Bytes`].

use crate::algorithm::{Completion, CompressionRoutine};
use crate::error::{CompressionError, CompressionResult, RoutineError};
use crate::options::CompressionOptions;
use crate::payload::{Payload, RoutineOutput};
use bytes::Bytes;
use tokio::sync::oneshot;
use tracing::trace;

/// Run `routine` over `payload` and wait for its completion
///
/// # Errors
///
/// - [`CompressionError::Routine`] carrying the routine's own failure unchanged
/// - [`CompressionError::Abandoned`] if the routine dropped its completion callback
///   without calling it
pub async fn run(
    payload: Payload,
    routine: &dyn CompressionRoutine,
    options: CompressionOptions,
) -> CompressionResult<Bytes> {
    let (tx, rx) = oneshot::channel();
    let done: Completion = Box::new(move |outcome| {
        // The receiver only goes away if the caller stopped waiting
        let _ = tx.send(outcome);
    });

    let input_len = payload.len();
    routine.compress(payload, options, done);

    match rx.await {
        Ok(Ok(output)) => {
            let bytes = output.into_bytes();
            trace!(
                routine = routine.name(),
                input = input_len,
                output = bytes.len(),
                "routine completed"
            );
            Ok(bytes)
        }
        Ok(Err(e)) => Err(CompressionError::Routine(e)),
        Err(_) => Err(CompressionError::abandoned(routine.name())),
    }
}

/// Run CPU-bound encoding off the async executor and report it through `done`
///
/// Inside a tokio runtime the work goes to the blocking pool; outside of one it
/// runs inline on the calling thread.
pub(crate) fn offload<F>(done: Completion, work: F)
where
    F: FnOnce() -> Result<RoutineOutput, RoutineError> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(move || done(work()));
        }
        Err(_) => done(work()),
    }
}
