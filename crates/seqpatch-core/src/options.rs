//! Tuning knobs for a single diff run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// A shared flag that asks a running diff to stop.
///
/// Clones observe the same flag, so one handle can be given to the engine and
/// another kept by whoever decides to cancel.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag that is not yet raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for [`diff_with`](crate::diff_with).
///
/// The worst case of the path search is quadratic in the combined input
/// length. Both limits are checked once per edit round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Give up after this many milliseconds. `None` means no limit.
    pub timeout_ms: Option<u64>,
    /// Cooperative cancellation. Not part of any serialized configuration.
    #[serde(skip)]
    pub cancel: Option<CancelFlag>,
}

impl DiffOptions {
    /// Options with no timeout and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout. Non-zero durations shorter than a millisecond round
    /// up to one millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let mut ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if ms == 0 && !timeout.is_zero() {
            ms = 1;
        }
        self.timeout_ms = Some(ms);
        self
    }

    /// Attach a cancellation flag.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Reject option combinations that could never produce a result.
    pub fn validate(&self) -> DiffResult<()> {
        if self.timeout_ms == Some(0) {
            return Err(DiffError::InvalidArgument(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
