//! Anything a host can route touch events to.

use crate::any::AnyRecognizer;
use crate::drag::DragGestureRecognizer;
use crate::event::MotionEvent;
use crate::recognizer::GestureRecognizer;
use crate::rotate::RotateGestureRecognizer;
use crate::scale::ScaleGestureRecognizer;

/// Receiver of a host's touch stream and loop ticks.
pub trait TouchTarget {
    /// Deliver one event. Returns `true` if it was consumed.
    fn deliver(&mut self, event: &MotionEvent) -> bool;

    /// Run work deferred to the next loop cycle. Returns `true` if anything ran.
    fn tick(&mut self) -> bool;
}

macro_rules! impl_touch_target {
    ($($ty:ty),+) => {
        $(
            impl TouchTarget for $ty {
                fn deliver(&mut self, event: &MotionEvent) -> bool {
                    self.on_touch_event(event)
                }

                fn tick(&mut self) -> bool {
                    self.run_pending()
                }
            }
        )+
    };
}

impl_touch_target!(
    DragGestureRecognizer,
    ScaleGestureRecognizer,
    RotateGestureRecognizer
);

impl TouchTarget for AnyRecognizer {
    fn deliver(&mut self, event: &MotionEvent) -> bool {
        self.on_touch_event(event)
    }

    fn tick(&mut self) -> bool {
        self.run_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Element, GestureConfig};
    use crate::event::MotionAction;
    use crate::recognizer::GestureState;

    #[test]
    fn test_targets_are_object_safe() {
        let config = GestureConfig::default().with_drag_slop(0.0);
        let mut drag = DragGestureRecognizer::with_config(config.clone());
        drag.attach(&Element::new(1));
        let mut any = AnyRecognizer::from(DragGestureRecognizer::with_config(config));
        any.attach(&Element::new(1));

        let targets: [&mut dyn TouchTarget; 2] = [&mut drag, &mut any];
        for target in targets {
            assert!(target.deliver(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0)));
            target.deliver(&MotionEvent::single(MotionAction::Move, 8, 10.0, 0.0));
            target.deliver(&MotionEvent::single(MotionAction::Up, 16, 10.0, 0.0));
            assert!(target.tick());
            assert!(!target.tick());
        }
        assert_eq!(drag.state(), GestureState::Possible);
        assert_eq!(any.state(), GestureState::Possible);
    }
}
