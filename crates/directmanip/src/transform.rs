//! The manipulated element's transform.

use directmanip_core::Point;
use serde::{Deserialize, Serialize};

/// Translation, scale and rotation of a manipulated element.
///
/// Platform neutral: the host applies it to whatever it draws. An element
/// point `p` lands at `translation + pivot + R(rotation) * S(scale) * (p - pivot)`,
/// so scale and rotation act around the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationTransform {
    /// Translation in pixels
    pub translation: Point,
    /// Horizontal scale factor
    pub scale_x: f32,
    /// Vertical scale factor
    pub scale_y: f32,
    /// Rotation in radians
    pub rotation: f32,
    /// Point in element coordinates that scale and rotation keep fixed
    pub pivot: Point,
}

impl ManipulationTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Point::ORIGIN,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        pivot: Point::ORIGIN,
    };

    /// Create a transform pivoting around the element origin.
    #[must_use]
    pub const fn new(translation: Point, scale_x: f32, scale_y: f32, rotation: f32) -> Self {
        Self {
            translation,
            scale_x,
            scale_y,
            rotation,
            pivot: Point::ORIGIN,
        }
    }

    /// Set the pivot.
    #[must_use]
    pub const fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    /// Map a point from element to parent coordinates.
    #[must_use]
    pub fn map_point(&self, point: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        let x = (point.x - self.pivot.x) * self.scale_x;
        let y = (point.y - self.pivot.y) * self.scale_y;
        self.translation + self.pivot + Point::new(x * cos - y * sin, x * sin + y * cos)
    }

    /// Map a point from parent back to element coordinates.
    ///
    /// Returns `None` when a scale factor is zero.
    #[must_use]
    pub fn unmap_point(&self, point: Point) -> Option<Point> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return None;
        }
        let (sin, cos) = self.rotation.sin_cos();
        let d = point - self.translation - self.pivot;
        let x = d.x * cos + d.y * sin;
        let y = d.y * cos - d.x * sin;
        Some(self.pivot + Point::new(x / self.scale_x, y / self.scale_y))
    }

    /// Rotation in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Check if this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ManipulationTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
