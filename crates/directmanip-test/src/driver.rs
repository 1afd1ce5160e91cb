//! Event-loop simulation for touch targets.

use directmanip_core::{MotionEvent, TouchTarget};
use std::collections::VecDeque;

/// Drives a [`TouchTarget`] the way a host event loop would.
///
/// Every delivered event is followed by a loop tick, so deferred resets fire
/// between events. Turn that off with [`Driver::manual_ticks`] to observe the
/// state in between.
#[derive(Debug)]
pub struct Driver<T> {
    target: T,
    queue: VecDeque<MotionEvent>,
    auto_tick: bool,
    delivered: usize,
    consumed: usize,
}

impl<T: TouchTarget> Driver<T> {
    /// Wrap a target.
    pub fn new(target: T) -> Self {
        Self {
            target,
            queue: VecDeque::new(),
            auto_tick: true,
            delivered: 0,
            consumed: 0,
        }
    }

    /// Only tick when [`Driver::tick`] is called.
    pub fn manual_ticks(mut self) -> Self {
        self.auto_tick = false;
        self
    }

    /// Queue events without delivering them.
    pub fn enqueue(&mut self, events: impl IntoIterator<Item = MotionEvent>) -> &mut Self {
        self.queue.extend(events);
        self
    }

    /// Deliver every queued event.
    pub fn flush(&mut self) -> &mut Self {
        while let Some(event) = self.queue.pop_front() {
            self.deliver(&event);
        }
        self
    }

    /// Deliver `events` in order.
    pub fn play(&mut self, events: &[MotionEvent]) -> &mut Self {
        for event in events {
            self.deliver(event);
        }
        self
    }

    /// Deliver one event. Returns whether the target consumed it.
    pub fn deliver(&mut self, event: &MotionEvent) -> bool {
        let consumed = self.target.deliver(event);
        self.delivered += 1;
        if consumed {
            self.consumed += 1;
        }
        if self.auto_tick {
            self.target.tick();
        }
        consumed
    }

    /// Run one loop tick.
    pub fn tick(&mut self) -> bool {
        self.target.tick()
    }

    /// Number of events delivered.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Number of events the target consumed.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of events still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Borrow the target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutably borrow the target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Unwrap the target.
    pub fn into_inner(self) -> T {
        self.target
    }
}
