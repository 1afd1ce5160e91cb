//! Rotate: angle of the line through the first two pointers.

use crate::config::GestureConfig;
use crate::event::{MotionAction, MotionEvent};
use crate::geometry::{consume_slop, wrap_angle, Point};
use crate::pointer;
use crate::recognizer::{set_state, GestureKind, GestureRecognizer, GestureState, RecognizerBase};

/// Recognizes a two-pointer rotation.
///
/// Needs at least two pointers; with fewer the measured angle is zero and the
/// gesture cannot begin. Consecutive samples are unwrapped, so a rotation
/// that crosses ±π keeps accumulating instead of jumping by a full turn.
#[derive(Debug)]
pub struct RotateGestureRecognizer {
    base: RecognizerBase<Self>,
    centroid: Point,
    initial_angle: f32,
    current_angle: f32,
}

impl RotateGestureRecognizer {
    /// Create a detached recognizer with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create a detached recognizer with the given overrides.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            base: RecognizerBase::new(config),
            centroid: Point::ORIGIN,
            initial_angle: 0.0,
            current_angle: 0.0,
        }
    }

    /// Rotation in radians since the gesture began.
    ///
    /// This is the cumulative angle, not a delta from the last `Changed`.
    pub fn rotation(&self) -> f32 {
        self.current_angle - self.initial_angle
    }

    fn anchor(&mut self, angle: f32) {
        self.initial_angle = angle;
        self.current_angle = angle;
    }

    fn finish(&mut self, action: MotionAction) {
        if self.is_in_progress() {
            let state = if action == MotionAction::Cancel {
                GestureState::Cancelled
            } else {
                GestureState::Recognized
            };
            set_state(self, state);
        }
        self.anchor(0.0);
    }
}

impl Default for RotateGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer for RotateGestureRecognizer {
    const KIND: GestureKind = GestureKind::Rotate;

    fn base(&self) -> &RecognizerBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecognizerBase<Self> {
        &mut self.base
    }

    fn handle_event(&mut self, event: &MotionEvent) {
        let action = event.action();
        if matches!(action, MotionAction::HoverMove | MotionAction::Other) {
            return;
        }

        let count = event.pointer_count();
        if let Some(centroid) = pointer::centroid(event, 2) {
            self.centroid = centroid;
        }
        let angle = pointer::angle(event);

        match action {
            MotionAction::Down => self.anchor(angle),
            MotionAction::PointerDown if count == 2 => self.anchor(angle),
            MotionAction::PointerDown | MotionAction::PointerUp if count > 2 => {
                let adjust = angle - self.current_angle;
                self.initial_angle += adjust;
                self.current_angle += adjust;
            }
            MotionAction::Move => {
                let angle = self.current_angle + wrap_angle(angle - self.current_angle);
                if !self.is_in_progress() {
                    let slop = self.base.thresholds().rotate_slop;
                    let delta = angle - self.initial_angle;
                    if delta.abs() > slop {
                        let adjust = consume_slop(delta, slop);
                        self.initial_angle += adjust;
                        self.current_angle += adjust;
                        set_state(self, GestureState::Began);
                    }
                }
                if self.is_in_progress() {
                    self.current_angle = angle;
                    set_state(self, GestureState::Changed);
                }
            }
            MotionAction::PointerUp | MotionAction::Up | MotionAction::Cancel => {
                self.finish(action);
            }
            MotionAction::PointerDown | MotionAction::HoverMove | MotionAction::Other => {}
        }
    }

    fn reset_gesture(&mut self) {
        self.centroid = Point::ORIGIN;
        self.anchor(0.0);
    }

    fn centroid(&self) -> Point {
        self.centroid
    }
}
