//! Release velocity estimation.
//!
//! The drag recognizer feeds every raw sample of a gesture into a
//! [`VelocityEstimator`] and asks for an estimate when the gesture ends.

use crate::geometry::Point;

/// Number of samples kept per axis.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent (relative to the newest) contribute.
const HORIZON_MS: i64 = 100;

/// If the pointer moved less than this over more than [`ASSUME_STOPPED_MS`],
/// it is considered stopped.
const MIN_MOVEMENT_PX: f32 = 2.0;

const ASSUME_STOPPED_MS: i64 = 40;

/// Per-sample weight decay; newer samples weigh more.
const RECENCY_DECAY: f32 = 0.95;

/// Something that turns timed position samples into a velocity.
pub trait VelocityEstimator {
    /// Record the position of the tracked pointer at `time_ms`.
    fn add_sample(&mut self, position: Point, time_ms: i64);

    /// Velocity in pixels per second, each axis clamped to `±max_speed`.
    fn estimate(&self, max_speed: f32) -> Point;

    /// Forget every sample.
    fn clear(&mut self);
}

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// One axis of [`VelocityTracker`]: a ring buffer and a weighted
/// least-squares slope over the recent window.
#[derive(Clone)]
struct AxisTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl AxisTracker {
    const fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    fn add(&mut self, time_ms: i64, value: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, value });
    }

    fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Velocity in units per second.
    fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut values = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut oldest = newest;
        let mut cursor = self.index;

        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            if !(0..=HORIZON_MS).contains(&age) {
                break;
            }
            oldest = sample;
            values[count] = sample.value;
            times[count] = -(age as f32);
            count += 1;
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        let span_ms = newest.time_ms - oldest.time_ms;
        if span_ms > ASSUME_STOPPED_MS && (newest.value - oldest.value).abs() < MIN_MOVEMENT_PX {
            return 0.0;
        }

        weighted_slope(&values[..count], &times[..count]) * 1000.0
    }
}

/// Slope of `values` over `times` by recency-weighted linear regression.
/// Index 0 is the newest sample.
fn weighted_slope(values: &[f32], times: &[f32]) -> f32 {
    let mut weight = 1.0f32;
    let (mut sw, mut st, mut sx, mut stt, mut stx) = (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for (&x, &t) in values.iter().zip(times) {
        sw += weight;
        st += weight * t;
        sx += weight * x;
        stt += weight * t * t;
        stx += weight * t * x;
        weight *= RECENCY_DECAY;
    }
    let denom = sw * stt - st * st;
    if denom.abs() < f32::EPSILON {
        return 0.0;
    }
    (sw * stx - st * sx) / denom
}

/// Default [`VelocityEstimator`]: two independent axis trackers.
#[derive(Clone)]
pub struct VelocityTracker {
    x: AxisTracker,
    y: AxisTracker,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: AxisTracker::new(),
            y: AxisTracker::new(),
        }
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VelocityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let samples = self.x.samples.iter().filter(|s| s.is_some()).count();
        f.debug_struct("VelocityTracker")
            .field("samples", &samples)
            .finish()
    }
}

impl VelocityEstimator for VelocityTracker {
    fn add_sample(&mut self, position: Point, time_ms: i64) {
        self.x.add(time_ms, position.x);
        self.y.add(time_ms, position.y);
    }

    fn estimate(&self, max_speed: f32) -> Point {
        let max_speed = if max_speed.is_nan() {
            f32::INFINITY
        } else {
            max_speed.abs()
        };
        Point::new(
            self.x.velocity().clamp(-max_speed, max_speed),
            self.y.velocity().clamp(-max_speed, max_speed),
        )
    }

    fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CAP: f32 = f32::MAX;

    fn tracker(samples: &[(i64, f32, f32)]) -> VelocityTracker {
        let mut t = VelocityTracker::new();
        for &(time, x, y) in samples {
            t.add_sample(Point::new(x, y), time);
        }
        t
    }

    #[test]
    fn test_empty_tracker_is_still() {
        assert_eq!(VelocityTracker::new().estimate(NO_CAP), Point::ORIGIN);
    }

    #[test]
    fn test_single_sample_is_still() {
        assert_eq!(tracker(&[(0, 10.0, 10.0)]).estimate(NO_CAP), Point::ORIGIN);
    }

    #[test]
    fn test_constant_velocity() {
        // 10 px per 10 ms on x, -5 px per 10 ms on y.
        let t = tracker(&[
            (0, 0.0, 0.0),
            (10, 10.0, -5.0),
            (20, 20.0, -10.0),
            (30, 30.0, -15.0),
        ]);
        let v = t.estimate(NO_CAP);
        assert!((v.x - 1000.0).abs() < 1.0, "x velocity {}", v.x);
        assert!((v.y + 500.0).abs() < 1.0, "y velocity {}", v.y);
    }

    #[test]
    fn test_estimate_is_capped() {
        let t = tracker(&[(0, 0.0, 0.0), (10, 1000.0, -1000.0), (20, 2000.0, -2000.0)]);
        let v = t.estimate(500.0);
        assert_eq!(v, Point::new(500.0, -500.0));
    }

    #[test]
    fn test_old_samples_ignored() {
        let t = tracker(&[
            (0, -5000.0, 0.0),
            (200, 0.0, 0.0),
            (210, 10.0, 0.0),
            (220, 20.0, 0.0),
        ]);
        let v = t.estimate(NO_CAP);
        assert!((v.x - 1000.0).abs() < 1.0, "x velocity {}", v.x);
    }

    #[test]
    fn test_stopped_pointer_is_still() {
        let t = tracker(&[(0, 100.0, 0.0), (30, 100.5, 0.0), (60, 101.0, 0.0)]);
        assert_eq!(t.estimate(NO_CAP), Point::ORIGIN);
    }

    #[test]
    fn test_clear() {
        let mut t = tracker(&[(0, 0.0, 0.0), (10, 100.0, 0.0)]);
        t.clear();
        assert_eq!(t.estimate(NO_CAP), Point::ORIGIN);
    }

    #[test]
    fn test_ring_buffer_wraps() {
        let samples: Vec<(i64, f32, f32)> = (0..50).map(|i| (i * 2, i as f32 * 4.0, 0.0)).collect();
        let v = tracker(&samples).estimate(NO_CAP);
        assert!((v.x - 2000.0).abs() < 1.0, "x velocity {}", v.x);
    }
}
