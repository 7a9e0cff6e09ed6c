//! Which pages are open: the cover, or a two-page spread.

use crate::prelude::*;

/// Reading position. Spreads always start on an even page (2, 4, 6, ...), so
/// page 1 is only ever shown through `Cover`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Single right-hand page showing page 1.
    Cover,
    /// Left page `n`, right page `n + 1`.
    Spread(usize),
}

/// Page indices visible for a view; `None` for an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagePair {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl PagePair {
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.left.into_iter().chain(self.right)
    }
}

/// Slider state: spreads from the first spread, and the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliderPosition {
    pub value: usize,
    pub max: usize,
}

impl SliderPosition {
    /// Filled share of the slider track, 0..=100.
    pub fn fill_percent(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.value as f32 / self.max as f32 * 100.0
        }
    }
}

/// Left index of the terminal spread: the largest even page number not past
/// the end. `None` when the book is too short to have spreads.
pub fn max_left(page_count: usize) -> Option<usize> {
    if page_count < 2 {
        None
    } else {
        Some(page_count - page_count % 2)
    }
}

fn slot(index: usize, page_count: usize) -> Option<usize> {
    (index >= 1 && index <= page_count).then_some(index)
}

impl View {
    pub fn start(mode: StartMode) -> Self {
        match mode {
            StartMode::Cover => View::Cover,
            StartMode::Spread => View::Spread(2),
        }
    }

    /// Terminal view: the last spread, or the cover for books under two pages.
    pub fn last(page_count: usize) -> Self {
        max_left(page_count).map_or(View::Cover, View::Spread)
    }

    pub fn indices(self, page_count: usize) -> PagePair {
        match self {
            View::Cover => PagePair {
                left: None,
                right: slot(1, page_count),
            },
            View::Spread(left) => PagePair {
                left: slot(left, page_count),
                right: slot(left + 1, page_count),
            },
        }
    }

    pub fn can_advance(self, page_count: usize) -> bool {
        if page_count == 0 {
            return false;
        }
        match (self, max_left(page_count)) {
            (View::Cover, _) => page_count >= 2,
            (View::Spread(left), Some(max)) => left < max,
            (View::Spread(_), None) => false,
        }
    }

    pub fn can_retreat(self) -> bool {
        !matches!(self, View::Cover)
    }

    pub fn next(self, page_count: usize) -> Self {
        match self {
            View::Cover => View::Spread(2),
            View::Spread(left) => {
                let max = max_left(page_count).unwrap_or(2);
                View::Spread((left + 2).min(max).max(left))
            }
        }
    }

    pub fn prev(self) -> Self {
        match self {
            View::Cover => View::Cover,
            View::Spread(left) if left <= 2 => View::Cover,
            View::Spread(left) => View::Spread(left - 2),
        }
    }

    pub fn slider_position(self, page_count: usize) -> SliderPosition {
        let max = page_count.saturating_sub(1).div_ceil(2);
        let value = match self {
            View::Cover => 0,
            View::Spread(left) => (left.saturating_sub(2) / 2 + 1).min(max),
        };
        SliderPosition { value, max }
    }

    /// Inverse of [`View::slider_position`]: zero is the start view, `n` the
    /// n-th spread, clamped to the terminal spread.
    pub fn from_slider(value: usize, page_count: usize, start: StartMode) -> Self {
        let max = page_count.saturating_sub(1).div_ceil(2);
        match value.min(max) {
            0 => View::start(start),
            n => {
                let left = 2 + (n - 1) * 2;
                View::Spread(max_left(page_count).map_or(left, |m| left.min(m)))
            }
        }
    }

    /// Single-page layout is only used while the cover is shown.
    pub fn is_single(self) -> bool {
        matches!(self, View::Cover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachable(page_count: usize) -> Vec<View> {
        let mut views = vec![View::Cover];
        let mut view = View::Cover;
        while view.can_advance(page_count) {
            view = view.next(page_count);
            views.push(view);
        }
        views
    }

    #[test]
    fn indices_stay_inside_the_book() {
        for page_count in 0..=12 {
            for view in reachable(page_count) {
                for page in view.indices(page_count).pages() {
                    assert!(page >= 1 && page <= page_count, "{:?} of {}", view, page_count);
                }
            }
        }
    }

    #[test]
    fn every_page_is_shown_exactly_once() {
        for page_count in 1..=12 {
            let mut seen: Vec<usize> = reachable(page_count)
                .into_iter()
                .flat_map(|v| v.indices(page_count).pages().collect::<Vec<_>>())
                .collect();
            seen.sort();
            assert_eq!(seen, (1..=page_count).collect::<Vec<_>>(), "page_count {}", page_count);
        }
    }

    #[test]
    fn spreads_start_on_even_pages() {
        for page_count in 0..=12 {
            for view in reachable(page_count) {
                if let View::Spread(left) = view {
                    assert_eq!(left % 2, 0);
                }
            }
        }
    }

    #[test]
    fn next_then_prev_round_trips() {
        for page_count in 2..=12 {
            for view in reachable(page_count) {
                if view.can_advance(page_count) {
                    assert_eq!(view.next(page_count).prev(), view);
                }
                if view.can_retreat() {
                    assert_eq!(view.prev().next(page_count), view);
                }
            }
        }
    }

    #[test]
    fn cover_rules() {
        assert!(!View::Cover.can_advance(0));
        assert!(!View::Cover.can_advance(1));
        assert!(View::Cover.can_advance(2));
        assert!(!View::Cover.can_retreat());
        assert!(View::Spread(2).can_retreat());
        assert_eq!(View::Cover.prev(), View::Cover);
        assert_eq!(View::Cover.indices(0), PagePair::default());
    }

    #[test]
    fn odd_count_ends_on_full_spread() {
        assert_eq!(max_left(5), Some(4));
        assert_eq!(View::Cover.next(5), View::Spread(2));
        assert_eq!(View::Spread(2).next(5), View::Spread(4));
        assert!(!View::Spread(4).can_advance(5));
        assert_eq!(
            View::Spread(4).indices(5),
            PagePair { left: Some(4), right: Some(5) }
        );
        assert_eq!(View::last(5), View::Spread(4));
    }

    #[test]
    fn even_count_ends_on_solo_left_page() {
        assert_eq!(max_left(6), Some(6));
        assert!(View::Spread(4).can_advance(6));
        assert!(!View::Spread(6).can_advance(6));
        assert_eq!(View::Spread(6).indices(6), PagePair { left: Some(6), right: None });
        assert_eq!(View::last(6), View::Spread(6));
        assert_eq!(View::Spread(6).next(6), View::Spread(6));
    }

    #[test]
    fn one_page_book_never_leaves_cover() {
        assert_eq!(View::last(1), View::Cover);
        assert_eq!(reachable(1), vec![View::Cover]);
        assert_eq!(View::Cover.indices(1), PagePair { left: None, right: Some(1) });
    }

    #[test]
    fn slider_counts_spreads() {
        assert_eq!(View::Cover.slider_position(5), SliderPosition { value: 0, max: 2 });
        assert_eq!(View::Spread(2).slider_position(5).value, 1);
        assert_eq!(View::Spread(4).slider_position(5).value, 2);
        assert_eq!(View::Spread(6).slider_position(6), SliderPosition { value: 3, max: 3 });
        assert_eq!(View::Cover.slider_position(0), SliderPosition { value: 0, max: 0 });
        assert_eq!(View::Spread(4).slider_position(5).fill_percent(), 100.0);
    }

    #[test]
    fn slider_round_trips_and_clamps() {
        for page_count in 0..=12 {
            for view in reachable(page_count) {
                let pos = view.slider_position(page_count);
                assert_eq!(View::from_slider(pos.value, page_count, StartMode::Cover), view);
            }
        }
        assert_eq!(View::from_slider(99, 5, StartMode::Cover), View::Spread(4));
        assert_eq!(View::from_slider(0, 5, StartMode::Spread), View::Spread(2));
    }
}
