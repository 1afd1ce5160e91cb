//! Geometric primitives: `Point` and the angle helpers used by the recognizers.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D point (or vector) with x and y coordinates in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Squared length of this point taken as a vector.
    ///
    /// Used for slop checks so no square root is taken per move event.
    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Length of this point taken as a vector.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Angle in radians of the vector from `self` to `other`, in `(-π, π]`.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Check both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Portion of `delta` a recognizer absorbs when its slop is first exceeded.
///
/// Returns `signum(delta) * min(|delta|, slop)`, so the reported value starts
/// at zero on the threshold rather than at the full overshoot.
#[must_use]
pub fn consume_slop(delta: f32, slop: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    delta.signum() * delta.abs().min(slop)
}

/// Wrap an angle in radians into `(-π, π]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_point_length_squared() {
        assert_eq!(Point::new(3.0, 4.0).length_squared(), 25.0);
        assert_eq!(Point::ORIGIN.length_squared(), 0.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let mut p = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
        assert_eq!(p, Point::new(4.0, 6.0));
        p -= Point::new(1.0, 1.0);
        assert_eq!(p, Point::new(3.0, 5.0));
        p += Point::new(-3.0, -5.0);
        assert_eq!(p, Point::ORIGIN);
        assert_eq!(Point::new(2.0, -1.0) * 3.0, Point::new(6.0, -3.0));
        assert_eq!(-Point::new(2.0, -1.0), Point::new(-2.0, 1.0));
    }

    #[test]
    fn test_angle_to() {
        let o = Point::ORIGIN;
        assert_eq!(o.angle_to(&Point::new(100.0, 0.0)), 0.0);
        assert!((o.angle_to(&Point::new(100.0, 100.0)) - FRAC_PI_4).abs() < 1e-6);
        assert!((o.angle_to(&Point::new(0.0, 20.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((o.angle_to(&Point::new(-1.0, 0.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_consume_slop() {
        assert_eq!(consume_slop(100.0, 8.0), 8.0);
        assert_eq!(consume_slop(-100.0, 8.0), -8.0);
        assert_eq!(consume_slop(3.0, 8.0), 3.0);
        assert_eq!(consume_slop(0.0, 8.0), 0.0);
        assert_eq!(consume_slop(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(FRAC_PI_2) - FRAC_PI_2).abs() < 1e-6);
        assert!((wrap_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_wrap_angle_in_range(angle in -100.0f32..100.0) {
            let wrapped = wrap_angle(angle);
            prop_assert!(wrapped > -PI - 1e-5 && wrapped <= PI + 1e-5);
            prop_assert!(wrap_angle(wrapped - angle).abs() < 1e-3);
        }

        #[test]
        fn prop_consume_slop_never_exceeds_delta(delta in -1000.0f32..1000.0, slop in 0.0f32..50.0) {
            let consumed = consume_slop(delta, slop);
            prop_assert!(consumed.abs() <= delta.abs());
            prop_assert!(consumed.abs() <= slop);
            prop_assert!(consumed == 0.0 || consumed.signum() == delta.signum());
        }

        #[test]
        fn prop_distance_symmetric(x1 in -1e3f32..1e3, y1 in -1e3f32..1e3, x2 in -1e3f32..1e3, y2 in -1e3f32..1e3) {
            let a = Point::new(x1, y1);
            let b = Point::new(x2, y2);
            prop_assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-3);
        }
    }
}
