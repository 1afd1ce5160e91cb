//! Touch input as delivered by the host platform.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pointer identifier, stable for the lifetime of one finger on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Masked action of a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionAction {
    /// First pointer went down.
    Down,
    /// One or more pointers moved.
    Move,
    /// Last pointer went up.
    Up,
    /// A non-primary pointer went down; see [`MotionEvent::action_index`].
    PointerDown,
    /// A non-last pointer went up; see [`MotionEvent::action_index`].
    PointerUp,
    /// The gesture was aborted by the platform.
    Cancel,
    /// Pointer hovering without contact.
    HoverMove,
    /// Any action the recognizers do not handle.
    Other,
}

impl MotionAction {
    /// Check if this action changes the pointer set mid-gesture.
    #[must_use]
    pub const fn is_pointer_change(&self) -> bool {
        matches!(self, Self::PointerDown | Self::PointerUp)
    }

    /// Check if this action ends the gesture stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// Position of one pointer in an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerCoords {
    /// Pointer ID
    pub id: PointerId,
    /// Position in the target's local coordinate space
    pub position: Point,
}

/// A multi-touch motion event.
///
/// Pointers are addressed by index, as on the host platform. Only pointer 0
/// carries a device-space (raw) coordinate; see `pointer::raw_point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    action: MotionAction,
    action_index: usize,
    event_time_ms: i64,
    pointers: Vec<PointerCoords>,
    raw: Point,
}

impl MotionEvent {
    /// Create an event whose pointers are given in local coordinates.
    ///
    /// Pointer ids default to the pointer index and the raw coordinate of
    /// pointer 0 equals its local coordinate.
    #[must_use]
    pub fn new(action: MotionAction, event_time_ms: i64, positions: &[Point]) -> Self {
        let pointers = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| PointerCoords {
                id: PointerId::new(i as u32),
                position,
            })
            .collect();
        let raw = positions.first().copied().unwrap_or_default();
        Self {
            action,
            action_index: 0,
            event_time_ms,
            pointers,
            raw,
        }
    }

    /// Create a single-pointer event.
    #[must_use]
    pub fn single(action: MotionAction, event_time_ms: i64, x: f32, y: f32) -> Self {
        Self::new(action, event_time_ms, &[Point::new(x, y)])
    }

    /// Set the index of the pointer that triggered a `PointerDown`/`PointerUp`.
    #[must_use]
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    /// Set the device-space coordinate of pointer 0.
    #[must_use]
    pub fn with_raw(mut self, raw: Point) -> Self {
        self.raw = raw;
        self
    }

    /// Replace the pointer ids, in index order.
    #[must_use]
    pub fn with_pointer_ids(mut self, ids: &[PointerId]) -> Self {
        for (coords, &id) in self.pointers.iter_mut().zip(ids) {
            coords.id = id;
        }
        self
    }

    /// Get the masked action.
    #[must_use]
    pub const fn action(&self) -> MotionAction {
        self.action
    }

    /// Get the index of the pointer that triggered the action.
    #[must_use]
    pub const fn action_index(&self) -> usize {
        self.action_index
    }

    /// Get the event timestamp in milliseconds.
    #[must_use]
    pub const fn event_time_ms(&self) -> i64 {
        self.event_time_ms
    }

    /// Get the number of pointers in the event, including a lifting one.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Get the pointer at `index`.
    #[must_use]
    pub fn pointer(&self, index: usize) -> Option<&PointerCoords> {
        self.pointers.get(index)
    }

    /// Get all pointers.
    #[must_use]
    pub fn pointers(&self) -> &[PointerCoords] {
        &self.pointers
    }

    /// Get the local coordinate of the pointer at `index`.
    #[must_use]
    pub fn local_point(&self, index: usize) -> Option<Point> {
        self.pointers.get(index).map(|p| p.position)
    }

    /// Get the device-space coordinate of pointer 0.
    #[must_use]
    pub const fn raw(&self) -> Point {
        self.raw
    }

    /// Check if the pointer at `index` is lifting with this event.
    #[must_use]
    pub fn is_lifting(&self, index: usize) -> bool {
        self.action == MotionAction::PointerUp && self.action_index == index
    }
}
