//! What the core asks of a rendering surface, plus a retained implementation.

use crate::prelude::*;

/// One page or two side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadLayout {
    /// The cover, shown alone.
    #[default]
    Single,
    Double,
}

/// A page to draw in a static slot or on a face of the turning sheet.
#[derive(Debug, Clone)]
pub struct PageSlot {
    pub index: usize,
    pub asset: Renderable,
}

/// Everything needed to draw the turning sheet for one frame. Missing faces
/// are drawn blank.
#[derive(Debug, Clone)]
pub struct TurnFrame {
    pub direction: TurnDirection,
    pub deg: f32,
    pub front: Option<PageSlot>,
    pub back: Option<PageSlot>,
    pub shade: ShadeFrame,
}

/// Enablement of the navigation controls for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlState {
    pub prev_enabled: bool,
    pub first_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    /// Grabbing the left edge can start a backward turn.
    pub drag_left_enabled: bool,
    /// Grabbing the right edge can start a forward turn.
    pub drag_right_enabled: bool,
    pub slider: SliderPosition,
    /// Filled share of the slider track, 0..=100.
    pub fill_percent: f32,
    pub layout: SpreadLayout,
}

pub trait BookSurface {
    /// Show `left` and `right` in the static slots, clearing any static shading.
    fn paint_pages(&mut self, layout: SpreadLayout, left: Option<PageSlot>, right: Option<PageSlot>);
    /// Show or update the turning sheet and its overlays.
    fn paint_turn(&mut self, frame: TurnFrame);
    /// Remove the turning sheet and every overlay it cast.
    fn clear_turn(&mut self);
    fn paint_controls(&mut self, controls: ControlState);
}

/// Retained surface: keeps the last thing painted so an immediate-mode UI
/// can redraw it every frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub layout: SpreadLayout,
    pub left: Option<PageSlot>,
    pub right: Option<PageSlot>,
    pub turn: Option<TurnFrame>,
    pub controls: ControlState,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static shading on the two resting pages; zero when no turn is shown.
    pub fn static_shade(&self) -> (f32, f32) {
        self.turn
            .as_ref()
            .map_or((0.0, 0.0), |t| (t.shade.static_left, t.shade.static_right))
    }

    /// Destination shadow on `side`; zero when no turn is shown.
    pub fn destination_shade(&self, side: Side) -> f32 {
        match &self.turn {
            Some(t) if t.shade.destination_side == side => t.shade.destination,
            _ => 0.0,
        }
    }

    /// Indices of every page currently referenced by the scene.
    pub fn visible_pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = [&self.left, &self.right]
            .into_iter()
            .flatten()
            .map(|slot| slot.index)
            .collect();
        if let Some(turn) = &self.turn {
            pages.extend(turn.front.iter().chain(turn.back.iter()).map(|slot| slot.index));
        }
        pages
    }
}

impl BookSurface for Scene {
    fn paint_pages(&mut self, layout: SpreadLayout, left: Option<PageSlot>, right: Option<PageSlot>) {
        self.layout = layout;
        self.left = left;
        self.right = right;
    }

    fn paint_turn(&mut self, frame: TurnFrame) {
        self.turn = Some(frame);
    }

    fn clear_turn(&mut self) {
        self.turn = None;
    }

    fn paint_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }
}
