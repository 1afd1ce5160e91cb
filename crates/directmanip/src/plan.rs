//! Plans: what a coordinator should let the user do with its element.

use directmanip_core::{
    AnyRecognizer, DragGestureRecognizer, GestureConfig, GestureKind, Result,
    RotateGestureRecognizer, ScaleGestureRecognizer,
};

/// A request to make an element respond to one kind of gesture, carrying the
/// recognizer that will do the recognizing.
#[derive(Debug)]
pub enum Plan {
    /// Drag the element around.
    Draggable(DragGestureRecognizer),
    /// Pinch to scale the element.
    Pinchable(ScaleGestureRecognizer),
    /// Twist to rotate the element.
    Rotatable(RotateGestureRecognizer),
}

impl Plan {
    /// A drag plan with a fresh recognizer.
    #[must_use]
    pub fn draggable() -> Self {
        Self::Draggable(DragGestureRecognizer::new())
    }

    /// A pinch plan with a fresh recognizer.
    #[must_use]
    pub fn pinchable() -> Self {
        Self::Pinchable(ScaleGestureRecognizer::new())
    }

    /// A rotate plan with a fresh recognizer.
    #[must_use]
    pub fn rotatable() -> Self {
        Self::Rotatable(RotateGestureRecognizer::new())
    }

    /// A plan of `kind` with a fresh recognizer using `config`.
    #[must_use]
    pub fn with_config(kind: GestureKind, config: GestureConfig) -> Self {
        match kind {
            GestureKind::Drag => Self::Draggable(DragGestureRecognizer::with_config(config)),
            GestureKind::Scale => Self::Pinchable(ScaleGestureRecognizer::with_config(config)),
            GestureKind::Rotate => Self::Rotatable(RotateGestureRecognizer::with_config(config)),
        }
    }

    /// Look up a plan by its name: `"draggable"`, `"pinchable"` or
    /// `"rotatable"`.
    pub fn from_name(name: &str) -> Result<Self> {
        GestureKind::from_plan_name(name).map(|kind| Self::with_config(kind, GestureConfig::default()))
    }

    /// Gesture kind this plan recognizes.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::Draggable(_) => GestureKind::Drag,
            Self::Pinchable(_) => GestureKind::Scale,
            Self::Rotatable(_) => GestureKind::Rotate,
        }
    }

    /// Name this plan is registered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().plan_name()
    }

    /// Take the recognizer out of the plan.
    #[must_use]
    pub fn into_recognizer(self) -> AnyRecognizer {
        match self {
            Self::Draggable(r) => r.into(),
            Self::Pinchable(r) => r.into(),
            Self::Rotatable(r) => r.into(),
        }
    }
}

impl From<AnyRecognizer> for Plan {
    fn from(recognizer: AnyRecognizer) -> Self {
        match recognizer {
            AnyRecognizer::Drag(r) => Self::Draggable(r),
            AnyRecognizer::Scale(r) => Self::Pinchable(r),
            AnyRecognizer::Rotate(r) => Self::Rotatable(r),
        }
    }
}

/// Drag, pinch and rotate together.
#[derive(Debug)]
pub struct DirectlyManipulable {
    /// Recognizer for the drag plan
    pub drag: DragGestureRecognizer,
    /// Recognizer for the pinch plan
    pub scale: ScaleGestureRecognizer,
    /// Recognizer for the rotate plan
    pub rotate: RotateGestureRecognizer,
}

impl DirectlyManipulable {
    /// All three plans with fresh recognizers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_recognizers(
            DragGestureRecognizer::new(),
            ScaleGestureRecognizer::new(),
            RotateGestureRecognizer::new(),
        )
    }

    /// All three plans with the given recognizers.
    #[must_use]
    pub const fn with_recognizers(
        drag: DragGestureRecognizer,
        scale: ScaleGestureRecognizer,
        rotate: RotateGestureRecognizer,
    ) -> Self {
        Self { drag, scale, rotate }
    }

    /// Split into the three individual plans.
    #[must_use]
    pub fn into_plans(self) -> [Plan; 3] {
        [
            Plan::Draggable(self.drag),
            Plan::Pinchable(self.scale),
            Plan::Rotatable(self.rotate),
        ]
    }
}

impl Default for DirectlyManipulable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directmanip_core::{GestureError, GestureRecognizer};

    #[test]
    fn test_from_name() {
        assert_eq!(Plan::from_name("draggable").unwrap().kind(), GestureKind::Drag);
        assert_eq!(Plan::from_name("pinchable").unwrap().kind(), GestureKind::Scale);
        assert_eq!(Plan::from_name("rotatable").unwrap().kind(), GestureKind::Rotate);
        assert!(matches!(
            Plan::from_name("foobar"),
            Err(GestureError::InvalidPlanName(name)) if name == "foobar"
        ));
    }

    #[test]
    fn test_name_matches_kind() {
        for plan in DirectlyManipulable::new().into_plans() {
            assert_eq!(plan.name(), plan.kind().plan_name());
        }
        assert_eq!(Plan::draggable().name(), "draggable");
        assert_eq!(Plan::pinchable().name(), "pinchable");
        assert_eq!(Plan::rotatable().name(), "rotatable");
    }

    #[test]
    fn test_with_config_carries_overrides() {
        let config = GestureConfig::default().with_rotate_slop(0.0);
        let Plan::Rotatable(r) = Plan::with_config(GestureKind::Rotate, config.clone()) else {
            panic!("expected a rotate plan");
        };
        assert_eq!(r.config(), &config);
    }

    #[test]
    fn test_recognizer_round_trip() {
        let plan = Plan::pinchable();
        let recognizer = plan.into_recognizer();
        assert_eq!(recognizer.kind(), GestureKind::Scale);
        assert_eq!(Plan::from(recognizer).kind(), GestureKind::Scale);
    }

    #[test]
    fn test_directly_manipulable_recognizers_start_detached() {
        let plan = DirectlyManipulable::default();
        assert!(plan.drag.element().is_none());
        assert!(plan.scale.element().is_none());
        assert!(plan.rotate.element().is_none());
    }
}
