//! Painting the open book: static pages, the turning sheet and its shading.

use crate::prelude::*;

const PAGE_COLOR: Color32 = Color32::from_rgb(250, 248, 242);
/// Share of the available height the book may use.
const BOOK_FILL: f32 = 0.96;
/// Width of the crease shading as a share of the half book.
const FOLD_WIDTH: f32 = 0.35;

/// Largest two-page book with pages of `aspect_ratio` that fits in `area`,
/// centred on it.
pub fn book_rect(area: Rect, aspect_ratio: f32) -> Rect {
    let aspect_ratio = if aspect_ratio > 0.0 { aspect_ratio } else { DEFAULT_PAGE_AR };
    let mut page_h = area.height() * BOOK_FILL;
    let mut page_w = page_h * aspect_ratio;
    if page_w * 2.0 > area.width() * BOOK_FILL {
        page_w = area.width() * BOOK_FILL / 2.0;
        page_h = page_w / aspect_ratio;
    }
    Rect::from_center_size(area.center(), vec2(page_w * 2.0, page_h))
}

pub fn left_half(book: Rect) -> Rect {
    Rect::from_min_max(book.min, pos2(book.center().x, book.max.y))
}

pub fn right_half(book: Rect) -> Rect {
    Rect::from_min_max(pos2(book.center().x, book.min.y), book.max)
}

fn black(alpha: f32) -> Color32 {
    Color32::from_black_alpha((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Quad filled with a left-to-right colour ramp.
fn horizontal_gradient(rect: Rect, left: Color32, right: Color32) -> Shape {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), left);
    mesh.colored_vertex(rect.right_top(), right);
    mesh.colored_vertex(rect.right_bottom(), right);
    mesh.colored_vertex(rect.left_bottom(), left);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    Shape::mesh(mesh)
}

/// Shadow darkest at the spine, fading toward the outer edge of `side`.
fn spine_shadow(book: Rect, side: Side, alpha: f32, width: f32) -> Option<Shape> {
    if alpha <= 0.0 || width <= 0.0 {
        return None;
    }
    let spine = book.center().x;
    let shadow = black(alpha);
    Some(match side {
        Side::Left => horizontal_gradient(
            Rect::from_min_max(pos2(spine - width, book.min.y), pos2(spine, book.max.y)),
            Color32::TRANSPARENT,
            shadow,
        ),
        Side::Right => horizontal_gradient(
            Rect::from_min_max(pos2(spine, book.min.y), pos2(spine + width, book.max.y)),
            shadow,
            Color32::TRANSPARENT,
        ),
    })
}

/// Page background with its image stretched over it, if there is one.
pub fn paint_page(painter: &egui::Painter, rect: Rect, texture: Option<&TextureHandle>) {
    painter.rect_filled(rect, 0.0, PAGE_COLOR);
    if let Some(texture) = texture {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.image(texture.id(), rect, uv, Color32::WHITE);
    }
}

/// Both static slots. `Single` layout only fills the right half; missing
/// pages are painted blank.
pub fn paint_spread(
    painter: &egui::Painter,
    book: Rect,
    layout: SpreadLayout,
    left: Option<&TextureHandle>,
    right: Option<&TextureHandle>,
) {
    if layout == SpreadLayout::Double {
        paint_page(painter, left_half(book), left);
    }
    paint_page(painter, right_half(book), right);
}

/// Shadows the turning sheet casts on the resting pages.
pub fn paint_static_shading(painter: &egui::Painter, book: Rect, scene: &Scene) {
    let half_w = book.width() / 2.0;
    let (left, right) = scene.static_shade();
    for (side, alpha) in [(Side::Left, left), (Side::Right, right)] {
        let shapes = [
            spine_shadow(book, side, alpha, half_w),
            spine_shadow(book, side, scene.destination_shade(side), half_w),
        ];
        for shape in shapes.into_iter().flatten() {
            painter.add(shape);
        }
    }
}

/// The turning sheet, foreshortened by the cosine of its angle around the spine.
/// Before the vertical it shows its front face over the source half, after
/// it the back face over the other half.
pub fn paint_turning_sheet(
    painter: &egui::Painter,
    book: Rect,
    frame: &TurnFrame,
    front: Option<&TextureHandle>,
    back: Option<&TextureHandle>,
) {
    let half_w = book.width() / 2.0;
    let spine = book.center().x;
    let cos = frame.deg.abs().to_radians().cos();
    let source = frame.direction.source_side();

    let (side, texture, width) = if cos >= 0.0 {
        (source, front, half_w * cos)
    } else {
        let other = match source {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        (other, back, half_w * -cos)
    };
    if width < 0.5 {
        return;
    }

    let sheet = match side {
        Side::Left => Rect::from_min_max(pos2(spine - width, book.min.y), pos2(spine, book.max.y)),
        Side::Right => Rect::from_min_max(pos2(spine, book.min.y), pos2(spine + width, book.max.y)),
    };
    paint_page(painter, sheet, texture);

    if frame.shade.dim > 0.0 {
        painter.rect_filled(sheet, 0.0, black(frame.shade.dim));
    }
    if let Some(shape) = spine_shadow(book, side, frame.shade.fold, width.min(half_w * FOLD_WIDTH)) {
        painter.add(shape);
    }
    painter.line_segment(
        [sheet.left_top(), sheet.left_bottom()],
        egui::Stroke::new(1.0, black(0.15)),
    );
    painter.line_segment(
        [sheet.right_top(), sheet.right_bottom()],
        egui::Stroke::new(1.0, black(0.15)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_fits_by_height_or_width() {
        let tall = book_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(2000.0, 600.0)), 0.5);
        assert!((tall.height() - 576.0).abs() < 1e-3);
        assert!((tall.width() - 576.0).abs() < 1e-3);

        let narrow = book_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 1000.0)), 0.5);
        assert!((narrow.width() - 384.0).abs() < 1e-3);
        assert!((narrow.height() - 384.0).abs() < 1e-3);
        assert_eq!(narrow.center(), pos2(200.0, 500.0));
    }

    #[test]
    fn halves_split_at_spine() {
        let book = Rect::from_min_size(pos2(10.0, 0.0), vec2(200.0, 100.0));
        assert_eq!(left_half(book).max.x, 110.0);
        assert_eq!(right_half(book).min.x, 110.0);
    }
}
