//! Thresholds and device constants for gesture recognition.

use crate::error::{GestureError, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Touch slop in density-independent pixels.
pub const BASE_TOUCH_SLOP_DP: f32 = 8.0;

/// Maximum fling velocity in density-independent pixels per second.
pub const BASE_MAXIMUM_FLING_VELOCITY_DP: f32 = 8000.0;

/// Default rotate slop: one degree.
pub const DEFAULT_ROTATE_SLOP: f32 = PI / 180.0;

/// Device-dependent constants supplied by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfiguration {
    /// Scaled touch slop in pixels.
    pub touch_slop: f32,
    /// Scaled maximum fling velocity in pixels per second.
    pub maximum_fling_velocity: f32,
}

impl ViewConfiguration {
    /// Create from explicit pixel values.
    #[must_use]
    pub const fn new(touch_slop: f32, maximum_fling_velocity: f32) -> Self {
        Self {
            touch_slop,
            maximum_fling_velocity,
        }
    }

    /// Scale the platform base constants for a display density.
    ///
    /// Touch slop is truncated to whole pixels, as the platform does.
    #[must_use]
    pub fn for_density(density: f32) -> Self {
        Self {
            touch_slop: (BASE_TOUCH_SLOP_DP * density).trunc(),
            maximum_fling_velocity: (BASE_MAXIMUM_FLING_VELOCITY_DP * density).trunc(),
        }
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

/// Identifier of the input target a recognizer is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ElementId(pub u64);

/// Input target a recognizer can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Target identity.
    pub id: ElementId,
    /// Constants consulted when a recognizer attaches.
    pub configuration: ViewConfiguration,
}

impl Element {
    /// Create an element with the default (density 1.0) configuration.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self::with_configuration(id, ViewConfiguration::default())
    }

    /// Create an element with explicit constants.
    #[must_use]
    pub const fn with_configuration(id: u64, configuration: ViewConfiguration) -> Self {
        Self {
            id: ElementId(id),
            configuration,
        }
    }
}

/// How a drag recognizer reports translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// Total centroid travel since the gesture began.
    #[default]
    Cumulative,
    /// Centroid travel since the previous `Changed` sample.
    Incremental,
}

/// Per-recognizer overrides.
///
/// `None` thresholds are derived from the element's [`ViewConfiguration`] when
/// the recognizer attaches. Setting a slop to zero is mostly useful for
/// deterministic tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GestureConfig {
    /// Centroid travel in pixels before a drag begins.
    pub drag_slop: Option<f32>,
    /// Span change in pixels before a scale begins.
    pub scale_slop: Option<f32>,
    /// Angle change in radians before a rotate begins.
    pub rotate_slop: Option<f32>,
    /// Cap for release velocity in pixels per second.
    pub maximum_fling_velocity: Option<f32>,
    /// Drag translation semantics.
    pub translation_mode: TranslationMode,
}

impl GestureConfig {
    /// Parse a configuration from TOML.
    ///
    /// ```
    /// use directmanip_core::GestureConfig;
    ///
    /// let config = GestureConfig::from_toml("drag_slop = 0.0").unwrap();
    /// assert_eq!(config.drag_slop, Some(0.0));
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every override is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("drag_slop", self.drag_slop),
            ("scale_slop", self.scale_slop),
            ("rotate_slop", self.rotate_slop),
            ("maximum_fling_velocity", self.maximum_fling_velocity),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(GestureError::InvalidConfig(format!(
                        "{name} must be a finite value >= 0, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Set the drag slop.
    #[must_use]
    pub fn with_drag_slop(mut self, slop: f32) -> Self {
        self.drag_slop = Some(slop);
        self
    }

    /// Set the scale slop.
    #[must_use]
    pub fn with_scale_slop(mut self, slop: f32) -> Self {
        self.scale_slop = Some(slop);
        self
    }

    /// Set the rotate slop in radians.
    #[must_use]
    pub fn with_rotate_slop(mut self, slop: f32) -> Self {
        self.rotate_slop = Some(slop);
        self
    }

    /// Set the release velocity cap.
    #[must_use]
    pub fn with_maximum_fling_velocity(mut self, velocity: f32) -> Self {
        self.maximum_fling_velocity = Some(velocity);
        self
    }

    /// Set the drag translation mode.
    #[must_use]
    pub fn with_translation_mode(mut self, mode: TranslationMode) -> Self {
        self.translation_mode = mode;
        self
    }

    /// Resolve the effective thresholds against an element's constants.
    ///
    /// Overrides that [`validate`](Self::validate) would reject are clamped:
    /// a negative value resolves to zero and a NaN to the element default.
    #[must_use]
    pub fn resolve(&self, configuration: &ViewConfiguration) -> Thresholds {
        Thresholds {
            drag_slop: threshold("drag_slop", self.drag_slop, configuration.touch_slop),
            scale_slop: threshold("scale_slop", self.scale_slop, configuration.touch_slop),
            rotate_slop: threshold("rotate_slop", self.rotate_slop, DEFAULT_ROTATE_SLOP),
            maximum_fling_velocity: threshold(
                "maximum_fling_velocity",
                self.maximum_fling_velocity,
                configuration.maximum_fling_velocity,
            ),
        }
    }
}

fn threshold(name: &str, value: Option<f32>, fallback: f32) -> f32 {
    match value {
        None => fallback,
        Some(v) if v.is_nan() => {
            log::warn!("{name} is NaN, using {fallback}");
            fallback
        }
        Some(v) if v < 0.0 => {
            log::warn!("{name} is negative ({v}), using 0");
            0.0
        }
        Some(v) => v,
    }
}

/// Effective thresholds of an attached recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Drag slop in pixels.
    pub drag_slop: f32,
    /// Scale slop in pixels.
    pub scale_slop: f32,
    /// Rotate slop in radians.
    pub rotate_slop: f32,
    /// Velocity cap in pixels per second.
    pub maximum_fling_velocity: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        GestureConfig::default().resolve(&ViewConfiguration::default())
    }
}
