//! Bottom bar: navigation buttons, spread slider and status line.

use crate::prelude::*;

/// What the user asked for in the bottom bar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAction {
    First,
    Prev,
    Next,
    Last,
    GoToSpread(usize),
}

fn page_label(view: View, page_count: usize) -> String {
    let pages: Vec<String> = view
        .indices(page_count)
        .pages()
        .map(|p| p.to_string())
        .collect();
    if pages.is_empty() {
        "No pages".to_string()
    } else {
        format!("{} / {}", pages.join("-"), page_count)
    }
}

/// Draw the bar for `controls` and report the first action taken.
pub fn draw_bottom_bar(
    ctx: &Context,
    controls: &ControlState,
    view: View,
    page_count: usize,
    logger: &UiLogger,
) -> Option<BarAction> {
    let mut action = None;
    egui::TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(controls.first_enabled, egui::Button::new("⏮"))
                .on_hover_text("First page")
                .clicked()
            {
                action = Some(BarAction::First);
            }
            if ui
                .add_enabled(controls.prev_enabled, egui::Button::new("⏴"))
                .on_hover_text("Previous spread")
                .clicked()
            {
                action = Some(BarAction::Prev);
            }

            let mut spread = controls.slider.value;
            let slider = egui::Slider::new(&mut spread, 0..=controls.slider.max)
                .show_value(false)
                .trailing_fill(true);
            if ui
                .add_enabled(controls.slider.max > 0, slider)
                .on_hover_text(format!("{:.0}% read", controls.fill_percent))
                .changed()
            {
                action = Some(BarAction::GoToSpread(spread));
            }

            if ui
                .add_enabled(controls.next_enabled, egui::Button::new("⏵"))
                .on_hover_text("Next spread")
                .clicked()
            {
                action = Some(BarAction::Next);
            }
            if ui
                .add_enabled(controls.last_enabled, egui::Button::new("⏭"))
                .on_hover_text("Last page")
                .clicked()
            {
                action = Some(BarAction::Last);
            }
            ui.separator();
            ui.label(RichText::new(page_label(view, page_count)).text_style(TextStyle::Monospace));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let Some((msg, level)) = logger.message() {
                    ui.colored_label(level.color(), msg);
                }
            });
        });
    });
    action
}
