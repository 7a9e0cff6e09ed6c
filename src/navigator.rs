//! Entry point for navigation: turns input into page turns and keeps the
//! surface in sync with the view.

use crate::prelude::*;

/// Owns the reading state of one open book. Every call either does nothing
/// (a turn is already running, or the move is not possible) or starts work
/// whose visible effect unfolds over the following [`Navigator::tick`]s.
pub struct Navigator<S: BookSurface> {
    pages: Arc<PageSequence>,
    view: View,
    cache: AssetCache,
    turns: TurnController,
    surface: S,
    start: StartMode,
    wheel_throttle: Duration,
    click_suppress: Duration,
    wheel_lock_until: Option<Instant>,
    suppress_click_until: Option<Instant>,
}

impl<S: BookSurface> Navigator<S> {
    pub fn new(pages: Arc<PageSequence>, cache: AssetCache, surface: S, config: &FlipbookConfig) -> Self {
        let mut nav = Self {
            pages,
            view: View::Cover,
            cache,
            turns: TurnController::new(config.turn_timing(), config.shading),
            surface,
            start: config.book.start,
            wheel_throttle: Duration::from_millis(config.animation.wheel_throttle_ms),
            click_suppress: Duration::from_millis(config.animation.click_suppress_ms),
            wheel_lock_until: None,
            suppress_click_until: None,
        };
        nav.view = nav.start_view();
        nav.render();
        nav
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn pages(&self) -> &PageSequence {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn turn_session(&self) -> Option<&TurnSession> {
        self.turns.session()
    }

    pub fn is_turning(&self) -> bool {
        self.turns.is_busy()
    }

    fn start_view(&self) -> View {
        match View::start(self.start) {
            View::Spread(_) if self.page_count() < 2 => View::Cover,
            view => view,
        }
    }

    pub fn controls(&self) -> ControlState {
        let page_count = self.page_count();
        let can_retreat = self.view.can_retreat();
        let can_advance = self.view.can_advance(page_count);
        let slider = self.view.slider_position(page_count);
        ControlState {
            prev_enabled: can_retreat,
            first_enabled: can_retreat,
            next_enabled: can_advance,
            last_enabled: can_advance,
            drag_left_enabled: can_retreat,
            drag_right_enabled: can_advance,
            slider,
            fill_percent: slider.fill_percent(),
            layout: self.layout(),
        }
    }

    fn layout(&self) -> SpreadLayout {
        if self.view.is_single() {
            SpreadLayout::Single
        } else {
            SpreadLayout::Double
        }
    }

    fn slot(&self, index: Option<usize>) -> Option<PageSlot> {
        let index = index?;
        let handle = self.pages.handle(index)?;
        Some(PageSlot {
            index,
            asset: self.cache.resolve(handle),
        })
    }

    fn handles(&self, indices: &[usize]) -> Vec<PageHandle> {
        indices
            .iter()
            .filter_map(|&i| self.pages.handle(i).cloned())
            .collect()
    }

    /// Repaint the static pages and controls for the current view.
    pub fn render(&mut self) {
        let pair = self.view.indices(self.page_count());
        let (left, right) = (self.slot(pair.left), self.slot(pair.right));
        let layout = self.layout();
        self.surface.paint_pages(layout, left, right);
        let controls = self.controls();
        self.surface.paint_controls(controls);
    }

    fn paint_pose(&mut self, pose: TurnPose) {
        let Some(plan) = self.turns.session().map(|s| s.plan().clone()) else {
            return;
        };
        let frame = TurnFrame {
            direction: pose.direction,
            deg: pose.deg,
            front: self.slot(plan.front),
            back: self.slot(plan.back),
            shade: pose.shade,
        };
        self.surface.paint_turn(frame);
    }

    fn can_turn(&self, direction: TurnDirection) -> bool {
        match direction {
            TurnDirection::Forward => self.view.can_advance(self.page_count()),
            TurnDirection::Backward => self.view.can_retreat(),
        }
    }

    /// Plan a turn, kick off its prefetch and show the destination pages
    /// underneath the sheet.
    fn prepare_turn(&mut self, direction: TurnDirection) -> Option<(TurnPlan, PrefetchGate)> {
        if self.turns.is_busy() || !self.can_turn(direction) {
            return None;
        }
        let plan = TurnPlan::new(self.view, direction, self.page_count());
        let gate = self.cache.prefetch(self.handles(&plan.prefetch));

        let (left, right) = (self.slot(plan.preview.left), self.slot(plan.preview.right));
        self.surface.paint_pages(SpreadLayout::Double, left, right);
        Some((plan, gate))
    }

    fn begin_turn(&mut self, direction: TurnDirection, now: Instant) -> bool {
        let Some((plan, gate)) = self.prepare_turn(direction) else {
            return false;
        };
        match self.turns.begin_animated(plan, gate, now) {
            Some(pose) => {
                self.paint_pose(pose);
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self, now: Instant) -> bool {
        self.begin_turn(TurnDirection::Forward, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        self.begin_turn(TurnDirection::Backward, now)
    }

    fn jump(&mut self, view: View) -> bool {
        if self.turns.is_busy() {
            return false;
        }
        self.view = view;
        self.render();
        true
    }

    pub fn first(&mut self) -> bool {
        let view = self.start_view();
        self.jump(view)
    }

    pub fn last(&mut self) -> bool {
        if self.page_count() == 0 {
            return false;
        }
        self.jump(View::last(self.page_count()))
    }

    /// Jump to the `n`-th spread as counted by the slider (0 is the start view).
    pub fn go_to_spread(&mut self, n: usize) -> bool {
        let view = match View::from_slider(n, self.page_count(), self.start) {
            View::Spread(_) if self.page_count() < 2 => View::Cover,
            view => view,
        };
        self.jump(view)
    }

    /// Grab the sheet on `side`: the right edge turns forward, the left backward.
    pub fn start_drag(&mut self, side: Side, pointer: PointerInput, geometry: BookGeometry) -> bool {
        let direction = TurnDirection::from_side(side);
        let Some((plan, gate)) = self.prepare_turn(direction) else {
            return false;
        };
        match self.turns.begin_drag(plan, gate, pointer, geometry) {
            Some(pose) => {
                self.paint_pose(pose);
                true
            }
            None => false,
        }
    }

    pub fn update_drag(&mut self, pointer: PointerInput) -> bool {
        match self.turns.update_drag(pointer) {
            Some(pose) => {
                self.paint_pose(pose);
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self, pointer: PointerInput, now: Instant) -> bool {
        match self.turns.end_drag(pointer, now) {
            Some(pose) => {
                self.suppress_click_until = Some(now + self.click_suppress);
                self.paint_pose(pose);
                true
            }
            None => false,
        }
    }

    /// Advance the running turn to `now`; call once per displayed frame.
    /// Returns what happened, or `None` when no turn is running.
    pub fn tick(&mut self, now: Instant) -> Option<TurnTick> {
        let tick = self.turns.tick(now)?;
        match &tick {
            TurnTick::Frame(pose) | TurnTick::AwaitingGate(pose) => self.paint_pose(*pose),
            TurnTick::Committed { target, .. } => {
                self.view = *target;
                self.surface.clear_turn();
                self.render();
            }
            TurnTick::Cancelled { origin, .. } => {
                self.view = *origin;
                self.surface.clear_turn();
                self.render();
            }
        }
        Some(tick)
    }

    /// Suspend until the running turn's prefetch has finished.
    pub async fn settle(&mut self) {
        self.turns.wait_for_gate().await;
    }

    /// Click inside the book: left half goes back, right half forward.
    pub fn click(&mut self, x: f32, geometry: BookGeometry, now: Instant) -> bool {
        if self.turns.is_busy() || self.suppress_click_until.is_some_and(|until| now < until) {
            return false;
        }
        match geometry.side_of(x) {
            Side::Left => self.prev(now),
            Side::Right => self.next(now),
        }
    }

    /// Mouse wheel: positive `delta_y` (scrolling down) goes forward. At most
    /// one turn per throttle window.
    pub fn wheel(&mut self, delta_y: f32, now: Instant) -> bool {
        if self.turns.is_busy() || self.wheel_lock_until.is_some_and(|until| now < until) {
            return false;
        }
        let turned = if delta_y > 0.0 {
            self.next(now)
        } else if delta_y < 0.0 {
            self.prev(now)
        } else {
            false
        };
        self.wheel_lock_until = Some(now + self.wheel_throttle);
        turned
    }

    pub fn key(&mut self, key: NavKey, now: Instant) -> bool {
        match key {
            NavKey::Next => self.next(now),
            NavKey::Prev => self.prev(now),
            NavKey::First => self.first(),
            NavKey::Last => self.last(),
        }
    }
}
