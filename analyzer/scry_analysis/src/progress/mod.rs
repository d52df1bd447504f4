//! Cross-thread progress reporting.

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_DONE: u8 = 2;

/// A cheap, cloneable handle onto an analyzer's progress.
///
/// The ratio is monotone non-decreasing while an analysis runs and pins
/// to exactly 1 when it returns. It weighs retired top-level entries at
/// one fifth and transitively retired sub-entries at four fifths, and is
/// an estimate of work done, not of wall-clock remaining. Safe to read
/// from any thread at any time.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    state: AtomicU8,
    top_total: AtomicU64,
    top_done: AtomicU64,
    sub_total: AtomicU64,
    sub_done: AtomicU64,
}

impl Progress {
    pub fn new() -> Self {
        Progress::default()
    }

    /// `None` before the first analysis begins, `Some(1.0)` after it
    /// completes.
    pub fn ratio(&self) -> Option<f64> {
        match self.inner.state.load(Ordering::Acquire) {
            STATE_IDLE => None,
            STATE_DONE => Some(1.0),
            _ => {
                let top = fraction(
                    self.inner.top_done.load(Ordering::Relaxed),
                    self.inner.top_total.load(Ordering::Relaxed),
                );
                let sub = fraction(
                    self.inner.sub_done.load(Ordering::Relaxed),
                    self.inner.sub_total.load(Ordering::Relaxed),
                );
                Some((0.2 * top + 0.8 * sub).min(1.0))
            }
        }
    }

    pub(crate) fn begin(&self, top_total: u64, sub_total: u64) {
        self.inner.top_total.store(top_total, Ordering::Relaxed);
        self.inner.top_done.store(0, Ordering::Relaxed);
        self.inner.sub_total.store(sub_total, Ordering::Relaxed);
        self.inner.sub_done.store(0, Ordering::Relaxed);
        self.inner.state.store(STATE_RUNNING, Ordering::Release);
    }

    pub(crate) fn retire_top(&self, count: u64) {
        self.inner.top_done.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn retire_sub(&self, count: u64) {
        self.inner.sub_done.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn finish(&self) {
        self.inner.state.store(STATE_DONE, Ordering::Release);
    }
}

#[allow(clippy::cast_precision_loss)]
fn fraction(done: u64, total: u64) -> f64 {
    if total == 0 {
        1.0
    } else {
        (done as f64 / total as f64).min(1.0)
    }
}
