//! Drag: centroid translation of every active pointer, with release velocity.

use crate::config::{GestureConfig, TranslationMode};
use crate::event::{MotionAction, MotionEvent};
use crate::geometry::{consume_slop, Point};
use crate::pointer;
use crate::recognizer::{set_state, GestureKind, GestureRecognizer, GestureState, RecognizerBase};
use crate::velocity::{VelocityEstimator, VelocityTracker};
use std::fmt;

/// Recognizes a drag of one or more pointers.
///
/// The drag begins once the centroid has travelled further than the drag slop
/// from where the gesture started. The slop itself is absorbed, so the first
/// reported translation is the travel beyond it. Pointers may be added or
/// lifted mid-gesture without the translation jumping.
pub struct DragGestureRecognizer {
    base: RecognizerBase<Self>,
    tracker: Box<dyn VelocityEstimator>,
    initial: Point,
    previous: Point,
    current: Point,
    velocity: Point,
    /// Position fed to the velocity tracker: the centroid's travel, continuous
    /// across changes of the pointer set.
    path: Point,
    /// Centroid at the last tracked event.
    path_centroid: Point,
}

impl DragGestureRecognizer {
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
            tracker: Box::new(VelocityTracker::new()),
            initial: Point::ORIGIN,
            previous: Point::ORIGIN,
            current: Point::ORIGIN,
            velocity: Point::ORIGIN,
            path: Point::ORIGIN,
            path_centroid: Point::ORIGIN,
        }
    }

    /// Replace the velocity estimator.
    #[must_use]
    pub fn with_estimator(mut self, estimator: Box<dyn VelocityEstimator>) -> Self {
        self.tracker = estimator;
        self
    }

    /// Translation of the centroid.
    ///
    /// With [`TranslationMode::Cumulative`] (the default) this is the total
    /// travel since the gesture began, not a delta from the last `Changed`.
    /// With [`TranslationMode::Incremental`] it is the travel since the
    /// previous `Changed` sample.
    pub fn translation(&self) -> Point {
        match self.base.config().translation_mode {
            TranslationMode::Cumulative => self.current - self.initial,
            TranslationMode::Incremental => self.current - self.previous,
        }
    }

    /// Release velocity in pixels per second.
    ///
    /// Only meaningful while the state is `Recognized` or `Cancelled`.
    pub const fn velocity(&self) -> Point {
        self.velocity
    }

    fn begin_if_past_slop(&mut self, centroid: Point) {
        let slop = self.base.thresholds().drag_slop;
        let delta = centroid - self.initial;
        if delta.length_squared() <= slop * slop {
            return;
        }
        let adjust = Point::new(consume_slop(delta.x, slop), consume_slop(delta.y, slop));
        self.initial += adjust;
        self.previous += adjust;
        self.current += adjust;
        set_state(self, GestureState::Began);
    }

    /// Feed the velocity tracker.
    ///
    /// Adding or lifting a pointer moves the centroid without any finger
    /// moving, so it only re-bases the path.
    fn track(&mut self, action: MotionAction, centroid: Point, time_ms: i64) {
        if action.is_pointer_change() {
            self.path_centroid = centroid;
            return;
        }
        if action == MotionAction::Down {
            self.path = centroid;
        } else {
            self.path += centroid - self.path_centroid;
        }
        self.path_centroid = centroid;
        self.tracker.add_sample(self.path, time_ms);
    }

    fn finish(&mut self, action: MotionAction) {
        if self.is_in_progress() {
            let max_speed = self.base.thresholds().maximum_fling_velocity;
            self.velocity = self.tracker.estimate(max_speed);
            let state = if action == MotionAction::Up {
                GestureState::Recognized
            } else {
                GestureState::Cancelled
            };
            set_state(self, state);
        }
        self.tracker.clear();
    }
}

impl Default for DragGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DragGestureRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragGestureRecognizer")
            .field("base", &self.base)
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

impl GestureRecognizer for DragGestureRecognizer {
    const KIND: GestureKind = GestureKind::Drag;

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

        if action == MotionAction::Down {
            self.tracker.clear();
        }

        let Some(centroid) = pointer::centroid_all(event) else {
            if action.is_terminal() {
                self.finish(action);
            }
            return;
        };
        self.track(action, centroid, event.event_time_ms());

        match action {
            MotionAction::Down => {
                self.initial = centroid;
                self.previous = centroid;
                self.current = centroid;
                self.velocity = Point::ORIGIN;
            }
            MotionAction::PointerDown | MotionAction::PointerUp => {
                let adjust = centroid - self.current;
                self.initial += adjust;
                self.previous += adjust;
                self.current += adjust;
            }
            MotionAction::Move => {
                if !self.is_in_progress() {
                    self.begin_if_past_slop(centroid);
                }
                if self.is_in_progress() {
                    self.previous = self.current;
                    self.current = centroid;
                    set_state(self, GestureState::Changed);
                }
            }
            MotionAction::Up | MotionAction::Cancel => self.finish(action),
            MotionAction::HoverMove | MotionAction::Other => {}
        }
    }

    fn reset_gesture(&mut self) {
        self.initial = Point::ORIGIN;
        self.previous = Point::ORIGIN;
        self.current = Point::ORIGIN;
        self.velocity = Point::ORIGIN;
        self.path = Point::ORIGIN;
        self.path_centroid = Point::ORIGIN;
        self.tracker.clear();
    }

    fn centroid(&self) -> Point {
        self.current
    }
}
