/*!
 * Interrupt Flag
 *
 * Host-level interruption signal for blocked waiters. A waiter checks the
 * flag between poll slices and unwinds with `WaitError::Interrupted`.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable interruption handle shared between a waiter and its interrupter
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every waiter holding this flag to unwind
    #[inline]
    pub fn interrupt(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Re-arm the flag for later waits
    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = InterruptFlag::new();
        let other = flag.clone();
        assert!(!other.is_interrupted());

        flag.interrupt();
        assert!(other.is_interrupted());

        other.clear();
        assert!(!flag.is_interrupted());
    }
}
