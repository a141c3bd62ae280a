//! Centralized theme constants for Memory Match
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
pub const ACCENT_DARK_TEXT: Color32 = Color32::from_rgb(0x04, 0x2f, 0x2e); // text on accent fill

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24); // amber-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_DISPLAY: f32 = 28.0;
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS - Board
// =============================================================================
pub const CARD_SMALL: f32 = 120.0;
pub const CARD_LARGE: f32 = 180.0;
pub const HEADER_HEIGHT: f32 = 64.0;
pub const BOARD_MAX_COLUMNS: usize = 8;
pub const BUTTON_HEIGHT: f32 = 28.0;

// =============================================================================
// CORNER RADIUS / STROKES / SPACING
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_CARD: f32 = 10.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MATCHED: f32 = 3.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let widget = |bg_fill: Color32, fg: Color32| egui::style::WidgetVisuals {
        bg_fill,
        weak_bg_fill: bg_fill,
        bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        fg_stroke: egui::Stroke::new(STROKE_DEFAULT, fg),
        corner_radius: RADIUS_DEFAULT.into(),
        expansion: 0.0,
    };

    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: Color32::from_rgb(0x12, 0x12, 0x14),
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        widgets: egui::style::Widgets {
            noninteractive: widget(BG_ELEVATED, TEXT_PRIMARY),
            inactive: widget(BG_ELEVATED, TEXT_SECONDARY),
            hovered: widget(lighten(BG_SURFACE, 0.08), TEXT_PRIMARY),
            active: widget(BG_SURFACE, TEXT_PRIMARY),
            open: widget(BG_SURFACE, TEXT_PRIMARY),
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 6.0);
        style.spacing.scroll.bar_width = 6.0;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn header_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_BASE)
        .inner_margin(egui::Margin::symmetric(SPACING_XL as i8, SPACING_LG as i8))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x12, 0x12, 0x14))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}

/// Accent teal button (primary actions like New game)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_DARK_TEXT))
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}

/// Settings checkbox row. Returns true if toggled.
pub fn settings_checkbox(ui: &mut egui::Ui, checked: bool, label: &str) -> bool {
    let (row_rect, row_resp) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 20.0),
        egui::Sense::click(),
    );
    if row_resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let painter = ui.painter();
    let cb_size = 16.0;
    let cb_rect = egui::Rect::from_min_size(
        egui::pos2(row_rect.min.x, row_rect.center().y - cb_size / 2.0),
        egui::vec2(cb_size, cb_size),
    );
    let border = if checked { ACCENT } else { BORDER_DEFAULT };
    painter.rect_stroke(cb_rect, 3.0, egui::Stroke::new(1.5, border), egui::StrokeKind::Inside);
    if checked {
        painter.rect_filled(cb_rect.shrink(3.0), 2.0, ACCENT);
    }
    painter.text(
        egui::pos2(cb_rect.max.x + SPACING_MD, row_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(FONT_BODY),
        TEXT_PRIMARY,
    );
    row_resp.clicked()
}

/// Card tint for hover/press feedback on face-down cards.
pub fn card_hover_overlay(response: &egui::Response) -> Option<Color32> {
    if response.is_pointer_button_down_on() {
        Some(Color32::from_rgba_unmultiplied(0x2d, 0xd4, 0xbf, 40))
    } else if response.hovered() {
        Some(Color32::from_rgba_unmultiplied(0x2d, 0xd4, 0xbf, 20))
    } else {
        None
    }
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}
