//! Fixed-duration angle tweens.

use crate::prelude::*;

/// Cubic ease-in-out on `0..=1`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// An eased move of the sheet angle from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Instant,
    pub duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Angle at `now`, and whether the tween has finished.
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let t = self.progress(now);
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from + (self.to - self.from) * ease_in_out(t), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.25) - 0.0625).abs() < 1e-6);
        assert!((ease_in_out(0.75) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn tween_reaches_target_exactly() {
        let t0 = Instant::now();
        let tween = Tween::new(0.0, -180.0, t0, Duration::from_millis(640));
        assert_eq!(tween.sample(t0), (0.0, false));
        let (mid, done) = tween.sample(t0 + Duration::from_millis(320));
        assert!(!done);
        assert!((mid + 90.0).abs() < 1e-3);
        assert_eq!(tween.sample(t0 + Duration::from_millis(700)), (-180.0, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t0 = Instant::now();
        let tween = Tween::new(40.0, 0.0, t0, Duration::ZERO);
        assert_eq!(tween.sample(t0), (0.0, true));
    }

    #[test]
    fn clock_before_start_holds_origin() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let tween = Tween::new(10.0, 20.0, t0, Duration::from_millis(100));
        assert_eq!(tween.sample(Instant::now()), (10.0, false));
    }
}
