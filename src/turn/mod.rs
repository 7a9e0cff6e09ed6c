//! Page turns: planning, animation, drag tracking and shading.

pub mod controller;
pub mod easing;
pub mod plan;
pub mod shading;

pub use controller::{DragTrack, TurnController, TurnPhase, TurnPose, TurnSession, TurnTick, TurnTiming};
pub use easing::{Tween, ease_in_out};
pub use plan::TurnPlan;
pub use shading::{ShadeFrame, ShadingParams, shade};

use crate::input::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    /// The right-hand sheet swings over to the left.
    Forward,
    /// The left-hand sheet swings over to the right.
    Backward,
}

impl TurnDirection {
    /// Sign of the rotation angle: forward turns run toward -180.
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Forward => -1.0,
            TurnDirection::Backward => 1.0,
        }
    }

    /// Angle at which the sheet lies flat on the far side.
    pub fn target_deg(self) -> f32 {
        180.0 * self.sign()
    }

    /// Grabbing the right edge turns forward, the left edge backward.
    pub fn from_side(side: Side) -> Self {
        match side {
            Side::Right => TurnDirection::Forward,
            Side::Left => TurnDirection::Backward,
        }
    }

    /// Side of the book the turning sheet starts on.
    pub fn source_side(self) -> Side {
        match self {
            TurnDirection::Forward => Side::Right,
            TurnDirection::Backward => Side::Left,
        }
    }
}
