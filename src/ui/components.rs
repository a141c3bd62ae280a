//! Reusable UI components
//!
//! Standalone painters and widgets used by the board and header.

use crate::theme;
use eframe::egui;

/// What to draw on a card tile
pub enum CardFace<'a> {
    Back(Option<&'a egui::TextureHandle>),
    Image(&'a egui::TextureHandle),
    /// Face up but the image is missing or still loading
    Placeholder { title: &'a str, loading: bool },
}

/// Paint a single card into `rect`.
pub fn paint_card(
    ui: &egui::Ui,
    rect: egui::Rect,
    face: CardFace<'_>,
    matched: bool,
    overlay: Option<egui::Color32>,
) {
    let painter = ui.painter();
    let radius = egui::CornerRadius::same(theme::RADIUS_CARD as u8);

    match face {
        CardFace::Back(Some(tex)) | CardFace::Image(tex) => {
            // Textured rect so the image is clipped to the rounded corners
            let mut shape = egui::epaint::RectShape::filled(rect, radius, egui::Color32::WHITE);
            shape.brush = Some(std::sync::Arc::new(egui::epaint::Brush {
                fill_texture_id: tex.id(),
                uv: egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            }));
            painter.add(shape);
        }
        CardFace::Back(None) => {
            painter.rect_filled(rect, radius, theme::BG_ELEVATED);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::QUESTION,
                egui::FontId::proportional(rect.height() * 0.3),
                theme::ACCENT,
            );
        }
        CardFace::Placeholder { title, loading } => {
            painter.rect_filled(rect, radius, theme::BG_SURFACE);
            let icon = if loading {
                egui_phosphor::regular::HOURGLASS
            } else {
                egui_phosphor::regular::IMAGE_BROKEN
            };
            painter.text(
                rect.center() - egui::vec2(0.0, theme::SPACING_LG),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(rect.height() * 0.22),
                theme::TEXT_MUTED,
            );
            painter.text(
                rect.center_bottom() - egui::vec2(0.0, theme::SPACING_XL),
                egui::Align2::CENTER_CENTER,
                title,
                egui::FontId::proportional(theme::FONT_SMALL),
                theme::TEXT_SECONDARY,
            );
        }
    }

    if let Some(color) = overlay {
        painter.rect_filled(rect, radius, color);
    }

    let stroke = if matched {
        egui::Stroke::new(theme::STROKE_MATCHED, theme::STATUS_SUCCESS)
    } else {
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE)
    };
    painter.rect_stroke(rect, radius, stroke, egui::StrokeKind::Inside);
}

/// Counter shown in the header, e.g. "✓ Matches 3"
pub fn stat(ui: &mut egui::Ui, icon: &str, label: &str, value: u32, color: egui::Color32) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(icon)
                .size(theme::FONT_TITLE)
                .color(color),
        )
        .selectable(false),
    );
    ui.add(
        egui::Label::new(
            egui::RichText::new(label)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
    ui.add(
        egui::Label::new(
            egui::RichText::new(value.to_string())
                .size(theme::FONT_TITLE)
                .strong()
                .color(theme::TEXT_PRIMARY),
        )
        .selectable(false),
    );
}

/// Number of columns and card edge length that fit `available` width.
pub fn board_layout(available: f32, base: f32, spacing: f32, cards: usize) -> (usize, f32) {
    let fit = ((available + spacing) / (base + spacing)).floor().max(1.0) as usize;
    let cols = fit.min(theme::BOARD_MAX_COLUMNS).min(cards.max(1));
    let size = ((available - spacing * (cols as f32 - 1.0)) / cols as f32)
        .min(base)
        .floor();
    (cols, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_layout() {
        // Wide window caps at the column limit and keeps the base size
        let (cols, size) = board_layout(3000.0, 180.0, 8.0, 40);
        assert_eq!(cols, theme::BOARD_MAX_COLUMNS);
        assert_eq!(size, 180.0);

        // Narrow window shrinks to one column that fills the width
        let (cols, size) = board_layout(100.0, 180.0, 8.0, 40);
        assert_eq!(cols, 1);
        assert_eq!(size, 100.0);

        // Never more columns than cards
        let (cols, _) = board_layout(3000.0, 120.0, 8.0, 2);
        assert_eq!(cols, 2);
    }
}
