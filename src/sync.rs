//! Search control primitives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop signal for a running search.
///
/// Setting the flag is monotonic: once stopped, a search stays stopped
/// until the flag is replaced for the next `go`. Any agent holding a
/// clone may set it; the search worker and the governor poll it.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// A fresh, unset flag.
    #[must_use]
    pub fn new() -> Self {
        StopFlag::default()
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Borrow the underlying atomic, e.g. to hand to a `Searcher`.
    #[inline]
    #[must_use]
    pub fn as_atomic(&self) -> &AtomicBool {
        &self.0
    }
}
