//! Toolkit-independent input events consumed by the navigator.

/// One half of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A pointer sample in the same horizontal coordinate space as [`BookGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub client_x: f32,
    pub phase: PointerPhase,
}

impl PointerInput {
    pub fn new(pointer_id: u64, client_x: f32, phase: PointerPhase) -> Self {
        Self {
            pointer_id,
            client_x,
            phase,
        }
    }
}

/// Horizontal extent of the open book on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookGeometry {
    pub left: f32,
    pub width: f32,
}

impl BookGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn spine(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn side_of(&self, x: f32) -> Side {
        if x < self.spine() { Side::Left } else { Side::Right }
    }
}

/// Discrete navigation commands, already decoded from whatever keys the host binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Prev,
    First,
    Last,
}
