//! Trailing-edge debounce bookkeeping
//!
//! The browser owns the actual timers; this tracks which one is current.
//! Arming a new timer hands back the pending handle so the caller can cancel
//! it, which keeps at most one callback pending per debouncer.

/// Debounce state for one operation. `H` is the platform timer handle.
#[derive(Debug)]
pub struct Debouncer<H> {
    delay_ms: i32,
    generation: u64,
    pending: Option<(u64, H)>,
}

impl<H> Debouncer<H> {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    /// Token for the next timer; capture it in the timer callback
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Record the timer for `generation`, returning the handle it replaces
    pub fn arm(&mut self, generation: u64, handle: H) -> Option<H> {
        self.pending.replace((generation, handle)).map(|(_, h)| h)
    }

    /// Called from the timer callback. Returns `true` only for the most
    /// recently armed generation, and clears it.
    pub fn fire(&mut self, generation: u64) -> bool {
        match self.pending {
            Some((current, _)) if current == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending timer, returning its handle for cancellation
    pub fn cancel(&mut self) -> Option<H> {
        self.pending.take().map(|(_, h)| h)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_arm_fires_once() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(150);
        let generation = debouncer.next_generation();
        assert_eq!(debouncer.arm(generation, 1), None);
        assert!(debouncer.is_pending());
        assert!(debouncer.fire(generation));
        assert!(!debouncer.fire(generation));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(150);
        let first = debouncer.next_generation();
        debouncer.arm(first, 10);
        let second = debouncer.next_generation();
        assert_eq!(debouncer.arm(second, 20), Some(10));
        // A stale callback that slipped through does nothing
        assert!(!debouncer.fire(first));
        assert!(debouncer.fire(second));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(2500);
        let generation = debouncer.next_generation();
        debouncer.arm(generation, 7);
        assert_eq!(debouncer.cancel(), Some(7));
        assert!(!debouncer.fire(generation));
        assert_eq!(debouncer.delay_ms(), 2500);
    }
}
