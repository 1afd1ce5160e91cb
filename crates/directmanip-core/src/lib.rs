//! Continuous gesture recognizers for multi-touch input.
//!
//! This crate turns a stream of raw motion events into drag, scale and rotate
//! gestures:
//! - Input: [`MotionEvent`], [`MotionAction`]
//! - Recognizers: [`DragGestureRecognizer`], [`ScaleGestureRecognizer`],
//!   [`RotateGestureRecognizer`], and the [`AnyRecognizer`] sum type
//! - State machine: [`GestureState`], [`GestureRecognizer`]
//! - Thresholds: [`ViewConfiguration`], [`GestureConfig`]
//!
//! Recognizers are single-threaded streaming reducers. Feed them events with
//! [`GestureRecognizer::on_touch_event`], observe them with listeners, and call
//! [`GestureRecognizer::run_pending`] once per host loop cycle so a finished
//! gesture can return to [`GestureState::Possible`].
//!
//! ```
//! use directmanip_core::{
//!     DragGestureRecognizer, Element, GestureConfig, GestureRecognizer, GestureState,
//!     MotionAction, MotionEvent, Point,
//! };
//!
//! let mut drag = DragGestureRecognizer::with_config(GestureConfig::default().with_drag_slop(0.0));
//! drag.attach(&Element::new(1));
//!
//! drag.on_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0));
//! drag.on_touch_event(&MotionEvent::single(MotionAction::Move, 16, 40.0, 0.0));
//! assert_eq!(drag.state(), GestureState::Changed);
//! assert_eq!(drag.translation(), Point::new(40.0, 0.0));
//! ```

mod any;
mod config;
mod drag;
mod error;
mod event;
mod geometry;
mod listener;
pub mod pointer;
mod recognizer;
mod rotate;
mod scale;
mod scheduler;
mod target;
mod velocity;

pub use any::AnyRecognizer;
pub use config::{
    Element, ElementId, GestureConfig, Thresholds, TranslationMode, ViewConfiguration,
    BASE_MAXIMUM_FLING_VELOCITY_DP, BASE_TOUCH_SLOP_DP, DEFAULT_ROTATE_SLOP,
};
pub use drag::DragGestureRecognizer;
pub use error::{GestureError, Result};
pub use event::{MotionAction, MotionEvent, PointerCoords, PointerId};
pub use geometry::{consume_slop, wrap_angle, Point};
pub use listener::{listener, Listener, ListenerRegistry, StateChangeListener};
pub use recognizer::{GestureKind, GestureRecognizer, GestureState, RecognizerBase};
pub use rotate::RotateGestureRecognizer;
pub use scale::ScaleGestureRecognizer;
pub use target::TouchTarget;
pub use velocity::{VelocityEstimator, VelocityTracker};
