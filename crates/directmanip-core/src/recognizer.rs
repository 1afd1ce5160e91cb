//! The recognizer state machine shared by every gesture kind.
//!
//! ```text
//! Possible ──slop exceeded──▶ Began ──▶ Changed ◀─┐
//!    ▲                                     │  └────┘ move
//!    │ next loop cycle              up ────┼──▶ Recognized ─┐
//!    └─────────────────────── cancel ──────┴──▶ Cancelled ──┘
//! ```
//!
//! A gesture that never left `Possible` ends silently: a tap never fires
//! `Recognized`.

use crate::config::{Element, ElementId, GestureConfig, Thresholds};
use crate::error::GestureError;
use crate::event::MotionEvent;
use crate::geometry::Point;
use crate::listener::{Listener, ListenerRegistry};
use crate::scheduler::Deferred;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State of a gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GestureState {
    /// Not yet recognized, possibly evaluating touch events. The initial state.
    #[default]
    Possible,
    /// The slop was just exceeded.
    Began,
    /// The gesture continues.
    Changed,
    /// The gesture ended normally. Resets to `Possible` on the next loop cycle.
    Recognized,
    /// The gesture was aborted. Resets to `Possible` on the next loop cycle.
    Cancelled,
}

impl GestureState {
    /// Check if the gesture is in progress (`Began` or `Changed`).
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// Check if the gesture has ended (`Recognized` or `Cancelled`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Recognized | Self::Cancelled)
    }
}

/// Kind of continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Centroid translation.
    Drag,
    /// Two-pointer span ratio.
    Scale,
    /// Two-pointer angle.
    Rotate,
}

impl GestureKind {
    /// Every kind, in dispatch order.
    pub const ALL: [Self; 3] = [Self::Drag, Self::Scale, Self::Rotate];

    /// Lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }

    /// Name under which a plan of this kind is registered.
    #[must_use]
    pub const fn plan_name(&self) -> &'static str {
        match self {
            Self::Drag => "draggable",
            Self::Scale => "pinchable",
            Self::Rotate => "rotatable",
        }
    }

    /// Look up a kind by its plan name.
    pub fn from_plan_name(name: &str) -> Result<Self, GestureError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.plan_name() == name)
            .ok_or_else(|| GestureError::InvalidPlanName(name.to_string()))
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GestureKind {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drag" | "pan" => Ok(Self::Drag),
            "scale" | "pinch" => Ok(Self::Scale),
            "rotate" | "rotation" => Ok(Self::Rotate),
            _ => Err(GestureError::UnknownGesture(s.to_string())),
        }
    }
}

/// State shared by every recognizer: FSM state, attachment, thresholds,
/// listeners and the deferred reset.
pub struct RecognizerBase<R> {
    state: GestureState,
    element: Option<Element>,
    config: GestureConfig,
    thresholds: Thresholds,
    listeners: ListenerRegistry<R>,
    reset: Deferred,
}

impl<R> RecognizerBase<R> {
    /// Create a detached base with the given overrides.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            state: GestureState::Possible,
            element: None,
            thresholds: Thresholds::default(),
            config,
            listeners: ListenerRegistry::new(),
            reset: Deferred::new(),
        }
    }

    /// Get the current state.
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Get the attached element.
    pub const fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    /// Get the configured overrides.
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Get the effective thresholds.
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Get the listener registry.
    pub const fn listeners(&self) -> &ListenerRegistry<R> {
        &self.listeners
    }

    /// Check if the deferred reset is pending.
    pub const fn has_pending_reset(&self) -> bool {
        self.reset.is_pending()
    }

    fn attach(&mut self, element: &Element, kind: GestureKind) {
        self.element = Some(*element);
        self.thresholds = self.config.resolve(&element.configuration);
        self.reset.cancel();
        self.state = GestureState::Possible;
        log::debug!(
            "{kind} recognizer attached to {:?} with {:?}",
            element.id,
            self.thresholds
        );
    }

    fn detach(&mut self, kind: GestureKind) {
        if let Some(element) = self.element.take() {
            log::debug!("{kind} recognizer detached from {:?}", element.id);
        }
        self.reset.cancel();
        self.state = GestureState::Possible;
    }

    fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
        if let Some(element) = &self.element {
            self.thresholds = self.config.resolve(&element.configuration);
        }
    }

    fn transition(&mut self, state: GestureState, kind: GestureKind) {
        log::trace!("{kind} recognizer {:?} -> {:?}", self.state, state);
        self.state = state;
        if self.reset.cancel() && !state.is_terminal() {
            log::trace!("{kind} recognizer dropped its pending reset");
        }
        if state.is_terminal() {
            self.reset.schedule();
        }
    }
}

impl<R> fmt::Debug for RecognizerBase<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognizerBase")
            .field("state", &self.state)
            .field("element", &self.element)
            .field("thresholds", &self.thresholds)
            .field("listeners", &self.listeners)
            .field("reset_pending", &self.reset.is_pending())
            .finish()
    }
}

/// A continuous gesture recognizer fed with raw motion events.
///
/// Implementations provide the kind-specific reduction in
/// [`GestureRecognizer::handle_event`]; attachment, listeners, state
/// notification and the deferred reset come from the provided methods.
pub trait GestureRecognizer: Sized + 'static {
    /// Kind of gesture this recognizer reports.
    const KIND: GestureKind;

    #[doc(hidden)]
    fn base(&self) -> &RecognizerBase<Self>;

    #[doc(hidden)]
    fn base_mut(&mut self) -> &mut RecognizerBase<Self>;

    /// Reduce one event. Only called while attached.
    fn handle_event(&mut self, event: &MotionEvent);

    /// Clear every per-gesture field.
    fn reset_gesture(&mut self);

    /// Centroid of the current gesture in raw coordinates.
    ///
    /// Only meaningful relative to other centroid values of the same gesture.
    fn centroid(&self) -> Point;

    /// Get the gesture kind.
    fn kind(&self) -> GestureKind {
        Self::KIND
    }

    /// Get the current state.
    fn state(&self) -> GestureState {
        self.base().state()
    }

    /// Check if the gesture is in progress.
    fn is_in_progress(&self) -> bool {
        self.state().is_in_progress()
    }

    /// Get the id of the attached element.
    fn element(&self) -> Option<ElementId> {
        self.base().element().map(|e| e.id)
    }

    /// Check if the recognizer is attached to an element.
    fn is_attached(&self) -> bool {
        self.base().element().is_some()
    }

    /// Get the configured overrides.
    fn config(&self) -> &GestureConfig {
        self.base().config()
    }

    /// Replace the overrides. Thresholds are re-resolved if attached.
    fn set_config(&mut self, config: GestureConfig) {
        self.base_mut().set_config(config);
    }

    /// Get the effective thresholds.
    fn thresholds(&self) -> Thresholds {
        self.base().thresholds()
    }

    /// Attach to an element, resolving thresholds from its configuration.
    ///
    /// Re-attaching resets the state and every per-gesture field.
    fn attach(&mut self, element: &Element) {
        self.base_mut().attach(element, Self::KIND);
        self.reset_gesture();
    }

    /// Detach from the element.
    ///
    /// A pending reset is cancelled and the recognizer silently returns to
    /// `Possible` with cleared per-gesture fields.
    fn detach(&mut self) {
        self.base_mut().detach(Self::KIND);
        self.reset_gesture();
    }

    /// Forward a touch event. Returns `true` if it was consumed, which is
    /// always the case while attached.
    fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !self.is_attached() {
            log::warn!(
                "{} recognizer received {:?} while detached",
                Self::KIND,
                event.action()
            );
            return false;
        }
        self.handle_event(event);
        true
    }

    /// Register a listener. Returns `false` if it was already registered.
    ///
    /// May be called from inside a state-change callback.
    fn add_listener(&self, listener: Listener<Self>) -> bool {
        self.base().listeners().add(listener)
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    fn remove_listener(&self, listener: &Listener<Self>) -> bool {
        self.base().listeners().remove(listener)
    }

    /// Check if the deferred reset to `Possible` is pending.
    fn has_pending_reset(&self) -> bool {
        self.base().has_pending_reset()
    }

    /// Run work deferred to the next loop cycle.
    ///
    /// The host calls this once the event that ended a gesture has been fully
    /// delivered. Returns `true` if the recognizer reset to `Possible`.
    fn run_pending(&mut self) -> bool {
        if !self.base_mut().reset.take_due() {
            return false;
        }
        log::trace!("{} recognizer running deferred reset", Self::KIND);
        set_state(self, GestureState::Possible);
        true
    }
}

/// Move `recognizer` to `state` and notify its listeners in registration
/// order. Terminal states schedule the deferred reset; any transition cancels
/// a previously scheduled one.
pub(crate) fn set_state<R: GestureRecognizer>(recognizer: &mut R, state: GestureState) {
    recognizer.base_mut().transition(state, R::KIND);
    let recognizer = &*recognizer;
    recognizer.base().listeners().dispatch(recognizer);
}
