//! Which pages take part in a turn, worked out before the sheet moves.

use crate::prelude::*;

/// Page indices for one turn from `origin` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    pub direction: TurnDirection,
    pub origin: View,
    pub target: View,
    /// Static slots shown underneath the sheet while it turns.
    pub preview: PagePair,
    /// Face of the sheet visible before it passes the vertical.
    pub front: Option<usize>,
    /// Face of the sheet visible after it passes the vertical.
    pub back: Option<usize>,
    /// Destination pages followed by the pair one spread further on.
    pub prefetch: Vec<usize>,
}

impl TurnPlan {
    pub fn new(origin: View, direction: TurnDirection, page_count: usize) -> Self {
        let current = origin.indices(page_count);
        let (target, preview, front, back, beyond) = match direction {
            TurnDirection::Forward => {
                let target = origin.next(page_count);
                let next = target.indices(page_count);
                let preview = PagePair {
                    // leaving the cover, page 1 becomes the left-hand page
                    left: current.left.or(current.right),
                    right: next.right,
                };
                let beyond = target
                    .can_advance(page_count)
                    .then(|| target.next(page_count).indices(page_count));
                (target, preview, current.right, next.left, beyond)
            }
            TurnDirection::Backward => {
                let target = origin.prev();
                let prev = target.indices(page_count);
                let preview = PagePair {
                    left: prev.left,
                    right: current.right,
                };
                let beyond = target
                    .can_retreat()
                    .then(|| target.prev().indices(page_count));
                (target, preview, current.left, prev.right, beyond)
            }
        };

        let mut prefetch: Vec<usize> = Vec::new();
        let destination = target.indices(page_count);
        for page in destination.pages().chain(beyond.iter().flat_map(|p| p.pages())) {
            if !prefetch.contains(&page) {
                prefetch.push(page);
            }
        }

        Self {
            direction,
            origin,
            target,
            preview,
            front,
            back,
            prefetch,
        }
    }
}
