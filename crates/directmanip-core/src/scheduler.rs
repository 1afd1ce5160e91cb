//! Cancellable zero-delay tasks on the host's single-threaded event loop.
//!
//! The host delivers touch events and, once it has finished the current loop
//! cycle, gives every recognizer a chance to run what it deferred (see
//! `GestureRecognizer::run_pending`). A [`Deferred`] slot holds at most one such
//! task; scheduling again replaces it and cancelling drops it.

/// Single-task slot that fires on the next loop cycle.
#[derive(Debug, Default)]
pub(crate) struct Deferred {
    pending: bool,
}

impl Deferred {
    /// Create an empty slot.
    pub(crate) const fn new() -> Self {
        Self { pending: false }
    }

    /// Schedule the task, replacing any pending run.
    pub(crate) fn schedule(&mut self) {
        self.pending = true;
    }

    /// Cancel the pending run. Returns `true` if one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Check if a run is pending.
    pub(crate) const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending run. Returns `true` if the caller should now
    /// perform the task.
    pub(crate) fn take_due(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle() {
        let mut slot = Deferred::new();
        assert!(!slot.is_pending());
        assert!(!slot.take_due());
        assert!(!slot.cancel());
    }

    #[test]
    fn test_schedule_then_take() {
        let mut slot = Deferred::new();
        slot.schedule();
        assert!(slot.is_pending());
        assert!(slot.take_due());
        assert!(!slot.take_due());
    }

    #[test]
    fn test_cancel() {
        let mut slot = Deferred::new();
        slot.schedule();
        assert!(slot.cancel());
        assert!(!slot.take_due());
    }

    #[test]
    fn test_reschedule_keeps_one_run() {
        let mut slot = Deferred::new();
        slot.schedule();
        slot.schedule();
        assert!(slot.take_due());
        assert!(!slot.is_pending());
    }
}
