//! Main application state and the per-frame loop.

use crate::prelude::*;
use crate::ui::{BarAction, PageTextures};

/// egui has a single mouse pointer; touches are not tracked separately.
const MOUSE_POINTER: u64 = 0;

/// The viewer window: loads a book in the background, then forwards input
/// to a [`Navigator`] and paints its [`Scene`].
pub struct FlipbookApp {
    config: FlipbookConfig,
    location: String,
    loading: Option<JoinHandle<Result<LoadedBook, AppError>>>,
    navigator: Option<Navigator<Scene>>,
    aspect_ratio: f32,
    textures: PageTextures,
    ui_logger: Arc<Mutex<UiLogger>>,
    dragging: bool,
}

impl FlipbookApp {
    /// Start discovering `location` on `runtime`; the window shows a spinner
    /// until it is done.
    pub fn new(_cc: &CreationContext, runtime: Handle, config: FlipbookConfig, location: String) -> Self {
        let task = {
            let (config, location, handle) = (config.clone(), location.clone(), runtime.clone());
            runtime.spawn(async move { open_book(&location, &config, handle).await })
        };
        Self {
            config,
            location,
            loading: Some(task),
            navigator: None,
            aspect_ratio: DEFAULT_PAGE_AR,
            textures: PageTextures::new(),
            ui_logger: Arc::new(Mutex::new(UiLogger::new())),
            dragging: false,
        }
    }

    fn with_logger(&self, f: impl FnOnce(&mut UiLogger)) {
        if let Ok(mut logger) = self.ui_logger.lock() {
            f(&mut logger);
        }
    }

    /// Pick up the discovery result once the background task has finished.
    fn poll_loading(&mut self) {
        let Some(task) = self.loading.take_if(|task| task.is_finished()) else {
            return;
        };
        match futures::executor::block_on(task) {
            Ok(Ok(book)) => {
                self.aspect_ratio = book.aspect_ratio_or_default();
                let count = book.pages.page_count();
                self.navigator = Some(Navigator::new(book.pages, book.cache, Scene::new(), &self.config));
                self.with_logger(|l| l.info(format!("Opened {} ({} pages)", self.location, count), None));
            }
            Ok(Err(e)) => self.with_logger(|l| l.error(format!("Failed to open book: {}", e), Some(10))),
            Err(e) => self.with_logger(|l| l.error(format!("Loading task failed: {}", e), Some(10))),
        }
    }

    fn handle_keys(&mut self, ctx: &Context, now: Instant) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        let pressed = ctx.input(|i| {
            [
                (egui::Key::ArrowRight, NavKey::Next),
                (egui::Key::PageDown, NavKey::Next),
                (egui::Key::Space, NavKey::Next),
                (egui::Key::ArrowLeft, NavKey::Prev),
                (egui::Key::PageUp, NavKey::Prev),
                (egui::Key::Home, NavKey::First),
                (egui::Key::End, NavKey::Last),
            ]
            .into_iter()
            .find(|(key, _)| i.key_pressed(*key))
            .map(|(_, nav_key)| nav_key)
        });
        if let Some(key) = pressed {
            nav.key(key, now);
        }
    }

    fn handle_bar_action(&mut self, action: BarAction, now: Instant) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        match action {
            BarAction::First => nav.first(),
            BarAction::Prev => nav.prev(now),
            BarAction::Next => nav.next(now),
            BarAction::Last => nav.last(),
            BarAction::GoToSpread(n) => nav.go_to_spread(n),
        };
    }

    /// Clicks, wheel and drags inside the book area.
    fn handle_pointer(&mut self, ctx: &Context, response: &egui::Response, book: Rect, now: Instant) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        let geometry = BookGeometry::new(book.left(), book.width());

        if response.drag_started() {
            let controls = nav.controls();
            let zone = book.width() * DRAG_ZONE;
            if let Some(origin) = ctx.input(|i| i.pointer.press_origin()) {
                let side = if origin.x <= book.left() + zone && controls.drag_left_enabled {
                    Some(Side::Left)
                } else if origin.x >= book.right() - zone && controls.drag_right_enabled {
                    Some(Side::Right)
                } else {
                    None
                };
                if let Some(side) = side {
                    let start = PointerInput::new(MOUSE_POINTER, origin.x, PointerPhase::Start);
                    self.dragging = nav.start_drag(side, start, geometry);
                }
            }
        }

        if self.dragging {
            let x = response.interact_pointer_pos().map(|p| p.x);
            if response.drag_stopped() {
                let phase = if x.is_some() { PointerPhase::End } else { PointerPhase::Cancel };
                nav.end_drag(PointerInput::new(MOUSE_POINTER, x.unwrap_or(book.center().x), phase), now);
                self.dragging = false;
            } else if let Some(x) = x {
                nav.update_drag(PointerInput::new(MOUSE_POINTER, x, PointerPhase::Move));
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if book.x_range().contains(pos.x) {
                    nav.click(pos.x, geometry, now);
                }
            }
        }

        if response.hovered() {
            // egui reports scrolling down as negative
            let delta = ctx.input(|i| i.raw_scroll_delta.y);
            if delta != 0.0 {
                nav.wheel(-delta, now);
            }
        }
    }

    fn display_book(&mut self, ctx: &Context) -> Option<BarAction> {
        let now = Instant::now();
        self.handle_keys(ctx, now);

        let mut action = None;
        if let Some(nav) = self.navigator.as_ref() {
            let controls = nav.controls();
            let logger = self.ui_logger.lock().map(|l| l.clone()).unwrap_or_default();
            action = crate::ui::draw_bottom_bar(ctx, &controls, nav.view(), nav.page_count(), &logger);
        }

        CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::from_gray(40)))
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(area, Sense::click_and_drag());
                let book = crate::ui::book_rect(area, self.aspect_ratio);

                self.handle_pointer(ctx, &response, book, now);
                if let Some(nav) = self.navigator.as_mut() {
                    nav.tick(now);
                }
                self.paint(ui, book);
            });

        if self.navigator.as_ref().is_some_and(|nav| nav.is_turning()) {
            ctx.request_repaint();
        }
        action
    }

    fn paint(&mut self, ui: &Ui, book: Rect) {
        let Some(nav) = self.navigator.as_ref() else {
            return;
        };
        let scene = nav.surface().clone();
        let cache = nav.cache().clone();
        let ctx = ui.ctx().clone();
        let painter = ui.painter_at(ui.max_rect());

        let visible: Vec<PageHandle> = [&scene.left, &scene.right]
            .into_iter()
            .flatten()
            .chain(scene.turn.iter().flat_map(|t| t.front.iter().chain(t.back.iter())))
            .map(|slot| slot.asset.handle().clone())
            .collect();
        self.textures.retain_visible(&visible);

        let mut texture = |slot: &Option<PageSlot>| {
            slot.as_ref()
                .and_then(|slot| self.textures.get(&ctx, &cache, slot.asset.handle()))
        };
        let left = texture(&scene.left);
        let right = texture(&scene.right);
        crate::ui::paint_spread(&painter, book, scene.layout, left.as_ref(), right.as_ref());

        if let Some(turn) = &scene.turn {
            let front = texture(&turn.front);
            let back = texture(&turn.back);
            crate::ui::paint_static_shading(&painter, book, &scene);
            crate::ui::paint_turning_sheet(&painter, book, turn, front.as_ref(), back.as_ref());
        }
    }

    fn display_loading(&self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::centered_and_justified(egui::Direction::TopDown), |ui| {
                if self.loading.is_some() {
                    ui.add(Spinner::new().size(48.0));
                } else {
                    ui.label(RichText::new("No pages found").text_style(TextStyle::Heading));
                }
            });
        });
    }
}

impl eframe::App for FlipbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loading();

        if self.navigator.is_some() {
            if let Some(action) = self.display_book(ctx) {
                self.handle_bar_action(action, Instant::now());
                ctx.request_repaint();
            }
        } else {
            self.display_loading(ctx);
            if self.loading.is_some() {
                ctx.request_repaint_after(Duration::from_millis(50));
            }
        }

        self.with_logger(|l| l.clear_expired());
    }
}
