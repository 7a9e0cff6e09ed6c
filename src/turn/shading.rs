//! Lighting overlays for a turning sheet, derived from the live angle alone.
//!
//! Nothing here depends on elapsed time, so the same angle always produces the
//! same shading whether it came from a timed animation or a drag.

use std::f32::consts::PI;

use crate::prelude::*;

/// Upper bounds and curve shape of every overlay.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    /// Peak opacity of the crease shading.
    pub fold_max: f32,
    /// Exponent applied to the bell curve before scaling the crease.
    pub fold_exponent: f32,
    /// Peak opacity of the shadow on the page being revealed.
    pub dest_max: f32,
    /// Opacity reached by the shadows on the two resting pages.
    pub static_max: f32,
    /// Peak opacity of the dimming on the turning sheet's faces.
    pub dim_max: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            fold_max: FOLD_MAX,
            fold_exponent: FOLD_EXPONENT,
            dest_max: DEST_MAX,
            static_max: STATIC_MAX,
            dim_max: DIM_MAX,
        }
    }
}

/// Overlay opacities for one pose of the sheet, all in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadeFrame {
    /// Crease shading along the turning sheet.
    pub fold: f32,
    /// Shadow on the destination-side slot.
    pub destination: f32,
    /// Which static slot receives `destination`.
    pub destination_side: Side,
    /// Gradient on the resting left page, darkest at the spine.
    pub static_left: f32,
    /// Gradient on the resting right page, darkest at the spine.
    pub static_right: f32,
    /// Dimming of both faces as the sheet falls onto the far side.
    pub dim: f32,
}

/// Bell curve over the turn: 0 flat, 1 standing upright at `|deg| = 90`.
fn bell(deg: f32) -> f32 {
    (PI * (deg.abs() / 180.0).min(1.0)).sin().max(0.0)
}

/// 0 at `theta = 45`, 1 at `theta = -90`.
fn ramp_rising(theta: f32) -> f32 {
    ((45.0 - theta) / 135.0).clamp(0.0, 1.0)
}

/// 1 at `theta = 90`, 0 at `theta = -45`.
fn ramp_falling(theta: f32) -> f32 {
    ((theta + 45.0) / 135.0).clamp(0.0, 1.0)
}

/// Shading for a sheet rotated `deg` degrees (forward turns run 0 → -180,
/// backward turns 0 → 180).
pub fn shade(deg: f32, direction: TurnDirection, params: &ShadingParams) -> ShadeFrame {
    let deg = deg.clamp(-180.0, 180.0);
    let k = bell(deg);

    // Backward turns mirror forward ones: flip the half-angle, swap the sides.
    let (theta, destination_side) = match direction {
        TurnDirection::Forward => (deg / 2.0, Side::Right),
        TurnDirection::Backward => (-deg / 2.0, Side::Left),
    };
    let (near, far) = (ramp_rising(theta), ramp_falling(theta));
    let (left, right) = match direction {
        TurnDirection::Forward => (near, far),
        TurnDirection::Backward => (far, near),
    };

    let falling_half = ((deg.abs() - 90.0) / 90.0).clamp(0.0, 1.0);

    ShadeFrame {
        fold: (params.fold_max * k.powf(params.fold_exponent)).clamp(0.0, 1.0),
        destination: (params.dest_max * k).clamp(0.0, 1.0),
        destination_side,
        static_left: (params.static_max * left).clamp(0.0, 1.0),
        static_right: (params.static_max * right).clamp(0.0, 1.0),
        dim: (params.dim_max * falling_half).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn unit() -> ShadingParams {
        ShadingParams {
            static_max: 1.0,
            ..ShadingParams::default()
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn fold_is_unimodal_over_a_turn() {
        let params = ShadingParams::default();
        for direction in [TurnDirection::Forward, TurnDirection::Backward] {
            let sign = if direction == TurnDirection::Forward { -1.0 } else { 1.0 };
            let folds: Vec<f32> = (0..=180)
                .map(|d| shade(sign * d as f32, direction, &params).fold)
                .collect();

            assert!(close(folds[0], 0.0));
            assert!(close(folds[90], 0.5));
            assert!(close(folds[180], 0.0));
            for i in 1..=90 {
                assert!(folds[i] >= folds[i - 1], "rising at {}", i);
            }
            for i in 91..=180 {
                assert!(folds[i] <= folds[i - 1], "falling at {}", i);
            }
        }
    }

    #[test]
    fn fold_ignores_direction_and_sign() {
        let params = ShadingParams::default();
        for d in [10.0, 45.0, 120.0, 170.0] {
            let a = shade(d, TurnDirection::Forward, &params).fold;
            let b = shade(-d, TurnDirection::Backward, &params).fold;
            let c = shade(-d, TurnDirection::Forward, &params).fold;
            assert!(close(a, b) && close(b, c));
        }
    }

    #[test]
    fn forward_static_windows() {
        let p = unit();
        // deg = 2 * theta
        assert!(close(shade(90.0, TurnDirection::Forward, &p).static_left, 0.0));
        assert!(close(shade(0.0, TurnDirection::Forward, &p).static_left, 1.0 / 3.0));
        assert!(close(shade(-180.0, TurnDirection::Forward, &p).static_left, 1.0));
        assert!(close(shade(180.0, TurnDirection::Forward, &p).static_right, 1.0));
        assert!(close(shade(-90.0, TurnDirection::Forward, &p).static_right, 0.0));
        assert!(close(shade(0.0, TurnDirection::Forward, &p).static_right, 1.0 / 3.0));
    }

    #[test]
    fn backward_mirrors_forward() {
        let p = ShadingParams::default();
        for d in [0.0_f32, 20.0, 60.0, 90.0, 135.0, 180.0] {
            let fwd = shade(-d, TurnDirection::Forward, &p);
            let bwd = shade(d, TurnDirection::Backward, &p);
            assert!(close(fwd.static_left, bwd.static_right));
            assert!(close(fwd.static_right, bwd.static_left));
            assert!(close(fwd.destination, bwd.destination));
            assert!(close(fwd.dim, bwd.dim));
        }
        assert_eq!(shade(30.0, TurnDirection::Backward, &p).destination_side, Side::Left);
        assert_eq!(shade(-30.0, TurnDirection::Forward, &p).destination_side, Side::Right);
    }

    #[test]
    fn flat_page_keeps_a_third_of_the_static_shadow() {
        let p = ShadingParams::default();
        let flat = shade(0.0, TurnDirection::Forward, &p);
        assert!(close(flat.static_left, STATIC_MAX / 3.0));
        assert!(close(flat.static_right, STATIC_MAX / 3.0));
        assert!(close(flat.destination, 0.0));
        assert!(close(flat.dim, 0.0));
    }

    #[test]
    fn destination_and_dim_profiles() {
        let p = ShadingParams::default();
        assert!(close(shade(-90.0, TurnDirection::Forward, &p).destination, DEST_MAX));
        assert!(close(shade(-90.0, TurnDirection::Forward, &p).dim, 0.0));
        assert!(close(shade(-135.0, TurnDirection::Forward, &p).dim, DIM_MAX / 2.0));
        assert!(close(shade(-180.0, TurnDirection::Forward, &p).dim, DIM_MAX));
    }

    #[test]
    fn out_of_range_angles_are_clamped() {
        let p = ShadingParams::default();
        assert_eq!(
            shade(-400.0, TurnDirection::Forward, &p),
            shade(-180.0, TurnDirection::Forward, &p)
        );
    }
}
