//! Cooperative cancellation
//!
//! A scan polls an [`Interrupt`] between pruning steps and between oracle
//! batches. When it fires, no new work is issued and whatever has been
//! accumulated so far is returned as a partial result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A signal the resolver polls to learn that the caller wants it to stop
pub trait Interrupt {
    /// True once the scan should stop issuing new work
    fn is_interrupted(&self) -> bool;
}

/// Clonable cancellation flag shared between a signal handler and a scan
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the non-cancelled state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Interrupt for CancellationToken {
    fn is_interrupted(&self) -> bool {
        self.is_cancelled()
    }
}

/// An interrupt that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninterrupted;

impl Interrupt for Uninterrupted {
    fn is_interrupted(&self) -> bool {
        false
    }
}

impl<F> Interrupt for F
where
    F: Fn() -> bool,
{
    fn is_interrupted(&self) -> bool {
        self()
    }
}
