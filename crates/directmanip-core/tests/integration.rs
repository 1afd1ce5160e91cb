//! Integration tests for directmanip-core.
//!
//! These tests drive the recognizers through their public API only.

use directmanip_core::{
    listener, AnyRecognizer, DragGestureRecognizer, Element, GestureConfig, GestureKind,
    GestureRecognizer, GestureState, MotionAction, MotionEvent, Point, RotateGestureRecognizer,
    ScaleGestureRecognizer, ViewConfiguration,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::f32::consts::FRAC_PI_4;
use std::rc::Rc;

use GestureState::{Began, Cancelled, Changed, Possible, Recognized};

fn record<R: GestureRecognizer>(recognizer: &R) -> Rc<RefCell<Vec<GestureState>>> {
    let states = Rc::new(RefCell::new(vec![recognizer.state()]));
    let sink = Rc::clone(&states);
    recognizer.add_listener(listener(move |r: &R| sink.borrow_mut().push(r.state())));
    states
}

fn multi(action: MotionAction, time: i64, index: usize, points: &[(f32, f32)]) -> MotionEvent {
    let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    MotionEvent::new(action, time, &points).with_action_index(index)
}

/// Deliver every event, running deferred work after each one like a host loop.
fn run<R: GestureRecognizer>(recognizer: &mut R, events: &[MotionEvent]) {
    for event in events {
        recognizer.on_touch_event(event);
        recognizer.run_pending();
    }
}

fn zero_slop() -> GestureConfig {
    GestureConfig::default()
        .with_drag_slop(0.0)
        .with_scale_slop(0.0)
        .with_rotate_slop(0.0)
}

// =============================================================================
// Drag
// =============================================================================

#[test]
fn test_drag_requires_slop_at_device_density() {
    let mut drag = DragGestureRecognizer::new();
    drag.attach(&Element::with_configuration(1, ViewConfiguration::for_density(2.0)));
    assert_eq!(drag.thresholds().drag_slop, 16.0);
    let states = record(&drag);

    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Move, 10, 10.0, 10.0),
        ],
    );
    assert_eq!(*states.borrow(), vec![Possible]);

    run(&mut drag, &[MotionEvent::single(MotionAction::Move, 20, 12.0, 12.0)]);
    assert_eq!(*states.borrow(), vec![Possible, Began, Changed]);
}

#[test]
fn test_drag_full_lifecycle() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    let states = record(&drag);

    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Move, 10, 100.0, 0.0),
            MotionEvent::single(MotionAction::Up, 20, 100.0, 0.0),
        ],
    );
    assert_eq!(
        *states.borrow(),
        vec![Possible, Began, Changed, Recognized, Possible]
    );
    assert_eq!(drag.state(), Possible);
}

#[test]
fn test_drag_cancel() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    let states = record(&drag);

    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Move, 10, 100.0, 0.0),
            MotionEvent::single(MotionAction::Cancel, 20, 100.0, 0.0),
        ],
    );
    assert_eq!(
        *states.borrow(),
        vec![Possible, Began, Changed, Cancelled, Possible]
    );
}

#[test]
fn test_tap_never_recognized() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    let states = record(&drag);

    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Up, 50, 0.0, 0.0),
        ],
    );
    assert_eq!(*states.borrow(), vec![Possible]);
}

#[test]
fn test_fling_velocity_direction() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    let events: Vec<MotionEvent> = std::iter::once(MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0))
        .chain((1..=5).map(|i| {
            MotionEvent::single(MotionAction::Move, i * 8, -(i as f32) * 20.0, i as f32 * 10.0)
        }))
        .chain(std::iter::once(MotionEvent::single(MotionAction::Up, 48, -100.0, 50.0)))
        .collect();

    let seen = Rc::new(RefCell::new(Point::ORIGIN));
    let sink = Rc::clone(&seen);
    drag.add_listener(listener(move |d: &DragGestureRecognizer| {
        if d.state() == Recognized {
            *sink.borrow_mut() = d.velocity();
        }
    }));
    run(&mut drag, &events);

    let velocity = *seen.borrow();
    assert!(velocity.x < 0.0, "{velocity:?}");
    assert!(velocity.y > 0.0, "{velocity:?}");
    assert!(velocity.x.abs() <= 8000.0);
}

#[test]
fn test_second_gesture_starts_clean() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Move, 10, 300.0, 300.0),
            MotionEvent::single(MotionAction::Up, 20, 300.0, 300.0),
        ],
    );

    let states = record(&drag);
    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 1000, 50.0, 50.0),
            MotionEvent::single(MotionAction::Move, 1010, 60.0, 50.0),
        ],
    );
    assert_eq!(*states.borrow(), vec![Possible, Began, Changed]);
    assert_eq!(drag.translation(), Point::new(10.0, 0.0));
}

// =============================================================================
// Scale and rotate
// =============================================================================

#[test]
fn test_pinch_doubles_scale_until_release() {
    let mut scale = ScaleGestureRecognizer::with_config(zero_slop());
    scale.attach(&Element::new(1));
    let states = record(&scale);

    run(
        &mut scale,
        &[
            multi(MotionAction::Down, 0, 0, &[(100.0, 100.0)]),
            multi(MotionAction::PointerDown, 5, 1, &[(100.0, 100.0), (200.0, 100.0)]),
            multi(MotionAction::Move, 10, 0, &[(50.0, 100.0), (250.0, 100.0)]),
        ],
    );
    assert_eq!(scale.scale(), 2.0);
    assert_eq!(scale.centroid(), Point::new(150.0, 100.0));

    run(
        &mut scale,
        &[multi(MotionAction::PointerUp, 20, 1, &[(50.0, 100.0), (250.0, 100.0)])],
    );
    assert_eq!(
        *states.borrow(),
        vec![Possible, Began, Changed, Recognized, Possible]
    );
}

#[test]
fn test_two_finger_rotation_eighth_turn() {
    let mut rotate = RotateGestureRecognizer::with_config(zero_slop());
    rotate.attach(&Element::new(1));
    run(
        &mut rotate,
        &[
            multi(MotionAction::Down, 0, 0, &[(0.0, 0.0)]),
            multi(MotionAction::PointerDown, 5, 1, &[(0.0, 0.0), (100.0, 0.0)]),
            multi(MotionAction::Move, 10, 0, &[(0.0, 0.0), (100.0, 100.0)]),
        ],
    );
    assert!((rotate.rotation() - FRAC_PI_4).abs() < 1e-5);
}

#[test]
fn test_same_stream_drives_every_kind() {
    let mut recognizers: Vec<AnyRecognizer> = vec![
        DragGestureRecognizer::with_config(zero_slop()).into(),
        ScaleGestureRecognizer::with_config(zero_slop()).into(),
        RotateGestureRecognizer::with_config(zero_slop()).into(),
    ];
    for r in &mut recognizers {
        r.attach(&Element::new(7));
    }

    let stream = [
        multi(MotionAction::Down, 0, 0, &[(-10.0, 0.0)]),
        multi(MotionAction::PointerDown, 1, 1, &[(-10.0, 0.0), (10.0, 0.0)]),
        multi(MotionAction::Move, 2, 0, &[(-20.0, 0.0), (20.0, 0.0)]),
        multi(MotionAction::Move, 3, 0, &[(0.0, -20.0), (0.0, 20.0)]),
        multi(MotionAction::Move, 4, 0, &[(10.0, -10.0), (10.0, 30.0)]),
    ];
    for event in &stream {
        for r in &mut recognizers {
            r.on_touch_event(event);
        }
    }

    assert!(recognizers.iter().all(|r| r.state() == Changed));
    assert_eq!(recognizers[0].translation().unwrap(), Point::new(10.0, 10.0));
    assert_eq!(recognizers[1].scale().unwrap(), 2.0);
    assert!((recognizers[2].rotation().unwrap() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert_eq!(recognizers[2].kind(), GestureKind::Rotate);
}

// =============================================================================
// Robustness
// =============================================================================

#[test]
fn test_hover_and_unknown_actions_are_idempotent() {
    let mut drag = DragGestureRecognizer::with_config(zero_slop());
    drag.attach(&Element::new(1));
    run(
        &mut drag,
        &[
            MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0),
            MotionEvent::single(MotionAction::Move, 10, 20.0, 0.0),
        ],
    );
    let before = (drag.state(), drag.centroid(), drag.translation(), drag.velocity());
    let states = record(&drag);

    for _ in 0..3 {
        run(
            &mut drag,
            &[
                MotionEvent::single(MotionAction::HoverMove, 20, 999.0, 999.0),
                MotionEvent::single(MotionAction::Other, 30, -999.0, 0.0),
            ],
        );
    }
    assert_eq!(
        (drag.state(), drag.centroid(), drag.translation(), drag.velocity()),
        before
    );
    assert_eq!(states.borrow().len(), 1);
}

#[test]
fn test_detached_recognizer_does_not_consume() {
    let mut drag = DragGestureRecognizer::new();
    assert!(!drag.on_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0)));
    drag.attach(&Element::new(1));
    assert!(drag.on_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0)));
    drag.detach();
    assert!(!drag.on_touch_event(&MotionEvent::single(MotionAction::Move, 0, 50.0, 0.0)));
    assert_eq!(drag.state(), Possible);
}

proptest! {
    #[test]
    fn prop_drag_translation_equals_travel_with_zero_slop(
        steps in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 1..20)
    ) {
        let mut drag = DragGestureRecognizer::with_config(zero_slop());
        drag.attach(&Element::new(1));
        drag.on_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, 0.0));
        let mut position = Point::ORIGIN;
        for (i, (dx, dy)) in steps.iter().enumerate() {
            position += Point::new(*dx, *dy);
            drag.on_touch_event(&MotionEvent::single(
                MotionAction::Move,
                (i as i64 + 1) * 10,
                position.x,
                position.y,
            ));
        }
        if drag.is_in_progress() {
            let t = drag.translation();
            prop_assert!((t.x - position.x).abs() < 1e-2);
            prop_assert!((t.y - position.y).abs() < 1e-2);
        } else {
            prop_assert!(position.length() < 1e-3);
        }
    }

    #[test]
    fn prop_states_follow_the_machine(
        actions in prop::collection::vec(0u8..5, 1..40)
    ) {
        let mut drag = DragGestureRecognizer::with_config(zero_slop());
        drag.attach(&Element::new(1));
        let states = record(&drag);
        let mut x = 0.0f32;
        for (i, a) in actions.iter().enumerate() {
            let action = match a {
                0 => MotionAction::Down,
                1 | 2 => MotionAction::Move,
                3 => MotionAction::Up,
                _ => MotionAction::Cancel,
            };
            x += 7.0;
            drag.on_touch_event(&MotionEvent::single(action, i as i64 * 10, x, 0.0));
            drag.run_pending();
        }

        let states = states.borrow();
        for pair in states.windows(2) {
            let allowed = match pair[0] {
                Possible => matches!(pair[1], Began),
                Began | Changed => matches!(pair[1], Changed | Recognized | Cancelled),
                Recognized | Cancelled => matches!(pair[1], Possible),
            };
            prop_assert!(allowed, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }
}
