//! A recognizer of any kind, dispatched by variant.

use crate::config::Element;
use crate::drag::DragGestureRecognizer;
use crate::error::{GestureError, Result};
use crate::event::MotionEvent;
use crate::geometry::Point;
use crate::recognizer::{GestureKind, GestureRecognizer, GestureState};
use crate::rotate::RotateGestureRecognizer;
use crate::scale::ScaleGestureRecognizer;

/// One of the three recognizer kinds.
///
/// Common operations forward to the wrapped recognizer. Kind-specific values
/// are read through the fallible accessors, which report a
/// [`GestureError::KindMismatch`] instead of a default value when asked of
/// the wrong kind.
#[derive(Debug)]
pub enum AnyRecognizer {
    /// Drag recognizer
    Drag(DragGestureRecognizer),
    /// Scale recognizer
    Scale(ScaleGestureRecognizer),
    /// Rotate recognizer
    Rotate(RotateGestureRecognizer),
}

macro_rules! forward {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            AnyRecognizer::Drag($r) => $body,
            AnyRecognizer::Scale($r) => $body,
            AnyRecognizer::Rotate($r) => $body,
        }
    };
}

impl AnyRecognizer {
    /// Create a detached recognizer of `kind` with default thresholds.
    #[must_use]
    pub fn new(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Drag => Self::Drag(DragGestureRecognizer::new()),
            GestureKind::Scale => Self::Scale(ScaleGestureRecognizer::new()),
            GestureKind::Rotate => Self::Rotate(RotateGestureRecognizer::new()),
        }
    }

    /// Get the gesture kind.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::Drag(_) => GestureKind::Drag,
            Self::Scale(_) => GestureKind::Scale,
            Self::Rotate(_) => GestureKind::Rotate,
        }
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        forward!(self, r => r.state())
    }

    /// Get the centroid in raw coordinates.
    #[must_use]
    pub fn centroid(&self) -> Point {
        forward!(self, r => r.centroid())
    }

    /// Attach to an element.
    pub fn attach(&mut self, element: &Element) {
        forward!(self, r => r.attach(element));
    }

    /// Detach from the element.
    pub fn detach(&mut self) {
        forward!(self, r => r.detach());
    }

    /// Check if attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        forward!(self, r => r.is_attached())
    }

    /// Forward a touch event.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        forward!(self, r => r.on_touch_event(event))
    }

    /// Run work deferred to the next loop cycle.
    pub fn run_pending(&mut self) -> bool {
        forward!(self, r => r.run_pending())
    }

    /// Centroid translation of a drag recognizer.
    pub fn translation(&self) -> Result<Point> {
        self.as_drag("translation").map(DragGestureRecognizer::translation)
    }

    /// Release velocity of a drag recognizer.
    pub fn velocity(&self) -> Result<Point> {
        self.as_drag("velocity").map(DragGestureRecognizer::velocity)
    }

    /// Scale factor of a scale recognizer.
    pub fn scale(&self) -> Result<f32> {
        match self {
            Self::Scale(r) => Ok(r.scale()),
            _ => Err(self.mismatch("scale", GestureKind::Scale)),
        }
    }

    /// Rotation in radians of a rotate recognizer.
    pub fn rotation(&self) -> Result<f32> {
        match self {
            Self::Rotate(r) => Ok(r.rotation()),
            _ => Err(self.mismatch("rotation", GestureKind::Rotate)),
        }
    }

    fn as_drag(&self, accessor: &'static str) -> Result<&DragGestureRecognizer> {
        match self {
            Self::Drag(r) => Ok(r),
            _ => Err(self.mismatch(accessor, GestureKind::Drag)),
        }
    }

    fn mismatch(&self, accessor: &'static str, expected: GestureKind) -> GestureError {
        GestureError::KindMismatch {
            accessor,
            expected,
            actual: self.kind(),
        }
    }
}

impl From<DragGestureRecognizer> for AnyRecognizer {
    fn from(r: DragGestureRecognizer) -> Self {
        Self::Drag(r)
    }
}

impl From<ScaleGestureRecognizer> for AnyRecognizer {
    fn from(r: ScaleGestureRecognizer) -> Self {
        Self::Scale(r)
    }
}

impl From<RotateGestureRecognizer> for AnyRecognizer {
    fn from(r: RotateGestureRecognizer) -> Self {
        Self::Rotate(r)
    }
}
