//! Routes one element's touch stream to its plans and applies the results.

use crate::plan::{DirectlyManipulable, Plan};
use crate::transform::ManipulationTransform;
use directmanip_core::{
    listener, AnyRecognizer, DragGestureRecognizer, Element, GestureError, GestureKind,
    GestureRecognizer, GestureState, Listener, MotionEvent, Point, Result,
    RotateGestureRecognizer, ScaleGestureRecognizer, TouchTarget, TranslationMode,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

type TransformObserver = Rc<dyn Fn(&ManipulationTransform)>;

/// State shared between the coordinator and the handlers it installs on its
/// recognizers.
#[derive(Default)]
struct Shared {
    transform: ManipulationTransform,
    /// Transform captured when the current gesture of each kind began.
    initial: ManipulationTransform,
    active: HashSet<GestureKind>,
    observers: Vec<TransformObserver>,
    /// Pivot restored when a scale or rotate gesture ends.
    home_pivot: Point,
    /// Set while a drag plan is present: scale and rotate then pivot around
    /// the fingers' centroid.
    follow_centroid: bool,
}

impl Shared {
    /// Apply one state change of a `kind` recognizer.
    ///
    /// `began` captures the initial value, `changed` writes the new transform.
    /// Observers run after the shared state is released so they may read the
    /// coordinator.
    fn handle(
        shared: &RefCell<Self>,
        kind: GestureKind,
        state: GestureState,
        began: impl FnOnce(&mut Self),
        changed: impl FnOnce(&mut Self),
    ) {
        let notify = {
            let mut s = shared.borrow_mut();
            match state {
                GestureState::Began => {
                    if s.active.insert(kind) {
                        log::debug!("{kind} gesture became active");
                    }
                    began(&mut *s);
                    None
                }
                GestureState::Changed => {
                    changed(&mut *s);
                    Some((s.transform, s.observers.clone()))
                }
                GestureState::Recognized | GestureState::Cancelled => {
                    if s.active.remove(&kind) {
                        log::debug!("{kind} gesture ended as {state:?}");
                    }
                    let before = s.transform;
                    if kind != GestureKind::Drag && s.follow_centroid {
                        let home = s.home_pivot;
                        s.move_pivot(home);
                    }
                    (s.transform != before).then(|| (s.transform, s.observers.clone()))
                }
                GestureState::Possible => None,
            }
        };
        if let Some((transform, observers)) = notify {
            for observer in &observers {
                observer(&transform);
            }
        }
    }

    /// Move the pivot, compensating the translation so nothing moves on
    /// screen.
    fn move_pivot(&mut self, pivot: Point) {
        let before = self.transform.map_point(pivot);
        self.transform.pivot = pivot;
        let adjust = before - self.transform.map_point(pivot);
        self.transform.translation += adjust;
        self.initial.translation += adjust;
    }

    /// Pivot around the element point currently under `centroid`.
    fn pivot_under(&mut self, centroid: Point) {
        if !self.follow_centroid {
            return;
        }
        match self.transform.unmap_point(centroid) {
            Some(pivot) => self.move_pivot(pivot),
            None => log::warn!("degenerate transform, pivot left at {:?}", self.transform.pivot),
        }
    }
}

fn drag_handler(shared: &Rc<RefCell<Shared>>) -> Listener<DragGestureRecognizer> {
    let shared = Rc::clone(shared);
    listener(move |r: &DragGestureRecognizer| {
        Shared::handle(
            &shared,
            GestureKind::Drag,
            r.state(),
            |s| s.initial.translation = s.transform.translation,
            |s| {
                let translation = r.translation();
                s.transform.translation = match r.config().translation_mode {
                    TranslationMode::Cumulative => s.initial.translation + translation,
                    TranslationMode::Incremental => s.transform.translation + translation,
                };
            },
        );
    })
}

fn scale_handler(shared: &Rc<RefCell<Shared>>) -> Listener<ScaleGestureRecognizer> {
    let shared = Rc::clone(shared);
    listener(move |r: &ScaleGestureRecognizer| {
        Shared::handle(
            &shared,
            GestureKind::Scale,
            r.state(),
            |s| {
                s.initial.scale_x = s.transform.scale_x;
                s.initial.scale_y = s.transform.scale_y;
            },
            |s| {
                s.pivot_under(r.centroid());
                let scale = r.scale();
                s.transform.scale_x = s.initial.scale_x * scale;
                s.transform.scale_y = s.initial.scale_y * scale;
            },
        );
    })
}

fn rotate_handler(shared: &Rc<RefCell<Shared>>) -> Listener<RotateGestureRecognizer> {
    let shared = Rc::clone(shared);
    listener(move |r: &RotateGestureRecognizer| {
        Shared::handle(
            &shared,
            GestureKind::Rotate,
            r.state(),
            |s| s.initial.rotation = s.transform.rotation,
            |s| {
                s.pivot_under(r.centroid());
                s.transform.rotation = s.initial.rotation + r.rotation();
            },
        );
    })
}

/// A recognizer installed on the coordinator, with the handler it notifies.
struct Slot<R: GestureRecognizer> {
    recognizer: R,
    handler: Listener<R>,
}

impl<R: GestureRecognizer> Slot<R> {
    fn install(mut recognizer: R, element: &Element, handler: Listener<R>) -> Self {
        if recognizer.element() != Some(element.id) {
            recognizer.attach(element);
        }
        recognizer.add_listener(Rc::clone(&handler));
        Self {
            recognizer,
            handler,
        }
    }

    fn uninstall(mut self) -> R {
        self.recognizer.remove_listener(&self.handler);
        self.recognizer.detach();
        self.recognizer
    }
}

/// Makes one element directly manipulable.
///
/// Holds at most one recognizer per gesture kind. Every touch event of the
/// element goes to all of them; their state changes are turned into a
/// [`ManipulationTransform`]:
/// - drag: translation = translation at `Began` + drag translation
/// - scale: scale = scale at `Began` × pinch scale
/// - rotate: rotation = rotation at `Began` + rotation
///
/// With a drag plan present, every scale or rotate change first moves the
/// transform's pivot to the element point under the two fingers' centroid, so
/// that point stays under the fingers. The pivot returns to where it was
/// set by [`with_transform`](Self::with_transform) or
/// [`set_transform`](Self::set_transform) when the gesture ends. Pivot moves
/// are compensated in the translation and never move the element on screen.
///
/// ```
/// use directmanip::{
///     Element, GestureConfig, GestureCoordinator, GestureKind, MotionAction, MotionEvent, Plan,
///     Point,
/// };
///
/// let mut coordinator = GestureCoordinator::new(Element::new(1));
/// let config = GestureConfig::default().with_drag_slop(0.0);
/// coordinator.add_plan(Plan::with_config(GestureKind::Drag, config));
///
/// coordinator.on_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0));
/// coordinator.on_touch_event(&MotionEvent::single(MotionAction::Move, 16, 100.0, 200.0));
/// coordinator.on_touch_event(&MotionEvent::single(MotionAction::Up, 32, 100.0, 200.0));
/// coordinator.tick();
///
/// assert_eq!(coordinator.transform().translation, Point::new(100.0, 200.0));
/// ```
pub struct GestureCoordinator {
    element: Element,
    shared: Rc<RefCell<Shared>>,
    drag: Option<Slot<DragGestureRecognizer>>,
    scale: Option<Slot<ScaleGestureRecognizer>>,
    rotate: Option<Slot<RotateGestureRecognizer>>,
}

impl GestureCoordinator {
    /// Create a coordinator for `element` with no plans and an identity
    /// transform.
    pub fn new(element: Element) -> Self {
        Self::with_transform(element, ManipulationTransform::IDENTITY)
    }

    /// Create a coordinator starting from an existing transform.
    pub fn with_transform(element: Element, transform: ManipulationTransform) -> Self {
        let shared = Shared {
            transform,
            initial: transform,
            home_pivot: transform.pivot,
            ..Shared::default()
        };
        Self {
            element,
            shared: Rc::new(RefCell::new(shared)),
            drag: None,
            scale: None,
            rotate: None,
        }
    }

    /// Get the managed element.
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Add a plan, attaching its recognizer to the element.
    ///
    /// A plan of a kind that is already present replaces it; the replaced
    /// recognizer is detached and returned.
    pub fn add_plan(&mut self, plan: Plan) -> Option<AnyRecognizer> {
        let kind = plan.kind();
        let replaced = self.remove_plan(kind);
        match plan {
            Plan::Draggable(r) => {
                let handler = drag_handler(&self.shared);
                self.drag = Some(Slot::install(r, &self.element, handler));
            }
            Plan::Pinchable(r) => {
                let handler = scale_handler(&self.shared);
                self.scale = Some(Slot::install(r, &self.element, handler));
            }
            Plan::Rotatable(r) => {
                let handler = rotate_handler(&self.shared);
                self.rotate = Some(Slot::install(r, &self.element, handler));
            }
        }
        self.shared.borrow_mut().follow_centroid = self.drag.is_some();
        log::debug!("added {} plan to {:?}", kind.plan_name(), self.element.id);
        replaced
    }

    /// Add the drag, pinch and rotate plans at once.
    pub fn add_directly_manipulable(&mut self, plan: DirectlyManipulable) {
        for plan in plan.into_plans() {
            self.add_plan(plan);
        }
    }

    /// Add a plan under `name`.
    ///
    /// The name must be `"draggable"`, `"pinchable"` or `"rotatable"` and
    /// must match the plan's kind.
    pub fn add_named_plan(&mut self, plan: Plan, name: &str) -> Result<Option<AnyRecognizer>> {
        let kind = GestureKind::from_plan_name(name)?;
        if kind != plan.kind() {
            return Err(GestureError::PlanNameMismatch {
                name: name.to_string(),
                kind: plan.kind(),
            });
        }
        Ok(self.add_plan(plan))
    }

    /// Remove the plan registered under `name`, returning its detached
    /// recognizer. Removing a plan that is not present is not an error.
    pub fn remove_named_plan(&mut self, name: &str) -> Result<Option<AnyRecognizer>> {
        let kind = GestureKind::from_plan_name(name)?;
        Ok(self.remove_plan(kind))
    }

    /// Remove the plan of `kind`, returning its detached recognizer.
    pub fn remove_plan(&mut self, kind: GestureKind) -> Option<AnyRecognizer> {
        let removed: AnyRecognizer = match kind {
            GestureKind::Drag => self.drag.take()?.uninstall().into(),
            GestureKind::Scale => self.scale.take()?.uninstall().into(),
            GestureKind::Rotate => self.rotate.take()?.uninstall().into(),
        };
        let mut shared = self.shared.borrow_mut();
        shared.active.remove(&kind);
        shared.follow_centroid = self.drag.is_some();
        drop(shared);
        log::debug!("removed {} plan from {:?}", kind.plan_name(), self.element.id);
        Some(removed)
    }

    /// Check if a plan of `kind` is present.
    pub const fn has_plan(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.drag.is_some(),
            GestureKind::Scale => self.scale.is_some(),
            GestureKind::Rotate => self.rotate.is_some(),
        }
    }

    /// Kinds with a plan, in dispatch order.
    pub fn kinds(&self) -> Vec<GestureKind> {
        GestureKind::ALL
            .into_iter()
            .filter(|&kind| self.has_plan(kind))
            .collect()
    }

    /// Forward a touch event to every plan's recognizer.
    ///
    /// Returns `true` if any recognizer consumed it.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        let mut handled = false;
        if let Some(slot) = &mut self.drag {
            handled |= slot.recognizer.on_touch_event(event);
        }
        if let Some(slot) = &mut self.scale {
            handled |= slot.recognizer.on_touch_event(event);
        }
        if let Some(slot) = &mut self.rotate {
            handled |= slot.recognizer.on_touch_event(event);
        }
        handled
    }

    /// Run every recognizer's deferred work. Call once per host loop cycle.
    ///
    /// Returns `true` if any recognizer reset.
    pub fn tick(&mut self) -> bool {
        let mut ran = false;
        if let Some(slot) = &mut self.drag {
            ran |= slot.recognizer.run_pending();
        }
        if let Some(slot) = &mut self.scale {
            ran |= slot.recognizer.run_pending();
        }
        if let Some(slot) = &mut self.rotate {
            ran |= slot.recognizer.run_pending();
        }
        ran
    }

    /// Check if any gesture is between `Began` and its end.
    pub fn is_active(&self) -> bool {
        !self.shared.borrow().active.is_empty()
    }

    /// Kinds whose gesture is in progress, in dispatch order.
    pub fn active_kinds(&self) -> Vec<GestureKind> {
        let shared = self.shared.borrow();
        GestureKind::ALL
            .into_iter()
            .filter(|kind| shared.active.contains(kind))
            .collect()
    }

    /// Get the current transform.
    pub fn transform(&self) -> ManipulationTransform {
        self.shared.borrow().transform
    }

    /// Replace the transform, e.g. after the host moved the element itself.
    ///
    /// Gestures in progress keep the values captured when they began.
    pub fn set_transform(&mut self, transform: ManipulationTransform) {
        let mut shared = self.shared.borrow_mut();
        shared.transform = transform;
        shared.home_pivot = transform.pivot;
    }

    /// Call `observer` with the new transform whenever a gesture changes it.
    pub fn on_transform_changed(&self, observer: impl Fn(&ManipulationTransform) + 'static) {
        self.shared.borrow_mut().observers.push(Rc::new(observer));
    }

    /// Get the drag recognizer.
    pub fn drag(&self) -> Option<&DragGestureRecognizer> {
        self.drag.as_ref().map(|slot| &slot.recognizer)
    }

    /// Get the scale recognizer.
    pub fn scale(&self) -> Option<&ScaleGestureRecognizer> {
        self.scale.as_ref().map(|slot| &slot.recognizer)
    }

    /// Get the rotate recognizer.
    pub fn rotate(&self) -> Option<&RotateGestureRecognizer> {
        self.rotate.as_ref().map(|slot| &slot.recognizer)
    }
}

impl TouchTarget for GestureCoordinator {
    fn deliver(&mut self, event: &MotionEvent) -> bool {
        self.on_touch_event(event)
    }

    fn tick(&mut self) -> bool {
        Self::tick(self)
    }
}

impl fmt::Debug for GestureCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCoordinator")
            .field("element", &self.element)
            .field("kinds", &self.kinds())
            .field("active", &self.active_kinds())
            .field("transform", &self.transform())
            .finish_non_exhaustive()
    }
}
