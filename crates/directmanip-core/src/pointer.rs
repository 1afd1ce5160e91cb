//! Per-event pointer math: raw positions, centroid, angle and span.
//!
//! All functions skip a pointer that is lifting with the event (the action
//! index of a `PointerUp`), so the values describe the pointer set that remains
//! after the event is applied.

use crate::event::MotionEvent;
use crate::geometry::Point;

/// Indices of the pointers that remain down after `event`, in index order.
pub fn remaining_indices(event: &MotionEvent) -> impl Iterator<Item = usize> + '_ {
    (0..event.pointer_count()).filter(move |&i| !event.is_lifting(i))
}

/// Device-space position of the pointer at `index`.
///
/// Pointer 0 uses the event's raw coordinate directly. Other pointers only
/// have local coordinates, so the raw/local offset of pointer 0 is added to
/// them. Raw positions do not move when the target itself is transformed by
/// the gesture, which keeps the recognizers free of feedback.
#[must_use]
pub fn raw_point(event: &MotionEvent, index: usize) -> Option<Point> {
    let local = event.local_point(index)?;
    if index == 0 {
        return Some(event.raw());
    }
    let offset = event.raw() - event.local_point(0)?;
    Some(local + offset)
}

/// Centroid of the first `limit` remaining pointers in raw coordinates.
///
/// Uses an incremental mean (`avg += (x - avg) / n`) rather than a sum, which
/// stays accurate for large coordinates. Returns `None` when no pointer
/// remains, so callers keep their previous value instead of taking a NaN.
#[must_use]
pub fn centroid(event: &MotionEvent, limit: usize) -> Option<Point> {
    let mut mean = Point::ORIGIN;
    let mut count = 0u32;
    for index in remaining_indices(event).take(limit) {
        let Some(point) = raw_point(event, index) else {
            continue;
        };
        count += 1;
        let n = count as f32;
        mean.x += (point.x - mean.x) / n;
        mean.y += (point.y - mean.y) / n;
    }
    if count == 0 {
        log::warn!(
            "no pointer remains in {:?} event, centroid left unchanged",
            event.action()
        );
        return None;
    }
    Some(mean)
}

/// Centroid of every remaining pointer.
#[must_use]
pub fn centroid_all(event: &MotionEvent) -> Option<Point> {
    centroid(event, usize::MAX)
}

/// Raw positions of the first two remaining pointers.
#[must_use]
pub fn first_pair(event: &MotionEvent) -> Option<(Point, Point)> {
    let mut indices = remaining_indices(event);
    let i0 = indices.next()?;
    let i1 = indices.next()?;
    Some((raw_point(event, i0)?, raw_point(event, i1)?))
}

/// Angle in radians from the first to the second remaining pointer.
///
/// Returns 0 when fewer than two pointers remain.
#[must_use]
pub fn angle(event: &MotionEvent) -> f32 {
    first_pair(event).map_or(0.0, |(p0, p1)| p0.angle_to(&p1))
}

/// Distance in pixels between the first two remaining pointers.
///
/// Returns 0 when fewer than two pointers remain.
#[must_use]
pub fn span(event: &MotionEvent) -> f32 {
    first_pair(event).map_or(0.0, |(p0, p1)| p0.distance(&p1))
}
