//! Scale: ratio of the span between the first two pointers.

use crate::config::GestureConfig;
use crate::event::{MotionAction, MotionEvent};
use crate::geometry::{consume_slop, Point};
use crate::pointer;
use crate::recognizer::{set_state, GestureKind, GestureRecognizer, GestureState, RecognizerBase};

/// Recognizes a pinch of two pointers.
///
/// The scale begins once the span has changed by more than the scale slop.
/// Further pointers beyond the second are ignored except that adding or
/// lifting one re-anchors the span so the scale does not jump. The gesture
/// ends when fewer than two pointers remain.
#[derive(Debug)]
pub struct ScaleGestureRecognizer {
    base: RecognizerBase<Self>,
    centroid: Point,
    initial_span: f32,
    current_span: f32,
}

impl ScaleGestureRecognizer {
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
            initial_span: 0.0,
            current_span: 0.0,
        }
    }

    /// Scale factor since the gesture began: current span over initial span.
    ///
    /// 1.0 at rest, and whenever the initial span is zero.
    pub fn scale(&self) -> f32 {
        if self.initial_span == 0.0 {
            return 1.0;
        }
        self.current_span / self.initial_span
    }

    /// Current span in pixels.
    pub const fn span(&self) -> f32 {
        self.current_span
    }

    fn anchor(&mut self, span: f32) {
        self.initial_span = span;
        self.current_span = span;
    }

    /// Follow a change of the measured pair without changing the scale.
    fn reanchor(&mut self, span: f32) {
        if self.current_span == 0.0 {
            self.anchor(span);
            return;
        }
        self.initial_span *= span / self.current_span;
        self.current_span = span;
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

impl Default for ScaleGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer for ScaleGestureRecognizer {
    const KIND: GestureKind = GestureKind::Scale;

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
        let span = pointer::span(event);

        match action {
            MotionAction::Down => self.anchor(span),
            MotionAction::PointerDown if count == 2 => self.anchor(span),
            MotionAction::PointerDown | MotionAction::PointerUp if count > 2 => self.reanchor(span),
            MotionAction::Move => {
                if !self.is_in_progress() {
                    let slop = self.base.thresholds().scale_slop;
                    let delta = span - self.initial_span;
                    if delta.abs() > slop {
                        let adjust = consume_slop(delta, slop);
                        self.initial_span += adjust;
                        self.current_span += adjust;
                        set_state(self, GestureState::Began);
                    }
                }
                if self.is_in_progress() {
                    self.current_span = span;
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
