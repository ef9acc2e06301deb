//! Theme constants and one-time style application for the egui app.

use super::QReviewApp;
use eframe::egui::{
    self, style::WidgetVisuals, Color32, CornerRadius, FontFamily, FontId, Margin, Stroke,
    TextStyle, Visuals,
};

pub(super) const COLOR_BG_PRIMARY: Color32 = Color32::from_rgb(0x0f, 0x14, 0x1c);
pub(super) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(0x17, 0x1d, 0x27);
pub(super) const COLOR_BG_TERTIARY: Color32 = Color32::from_rgb(0x22, 0x29, 0x35);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0xd5, 0xdb, 0xe3);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x93, 0x9c, 0xa8);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x6b, 0x74, 0x80);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0x4c, 0x6f, 0xff);
pub(super) const COLOR_ACCENT_HOVER: Color32 = Color32::from_rgb(0x3a, 0x5b, 0xe0);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0x30, 0x38, 0x45);
pub(super) const COLOR_SUCCESS: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
pub(super) const COLOR_DANGER: Color32 = Color32::from_rgb(0xff, 0x47, 0x57);
pub(super) const COLOR_WARNING: Color32 = Color32::from_rgb(0xf1, 0xc4, 0x0f);

/// Parse a `#rrggbb` palette entry, falling back to muted text color.
pub(super) fn hex_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(COLOR_TEXT_MUTED)
}

fn widget(bg: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, stroke),
        corner_radius: CornerRadius::same(6),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

impl QReviewApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::dark();
        style.visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        style.visuals.window_fill = COLOR_BG_PRIMARY;
        style.visuals.panel_fill = COLOR_BG_SECONDARY;
        style.visuals.extreme_bg_color = COLOR_BG_PRIMARY;
        style.visuals.faint_bg_color = COLOR_BG_TERTIARY;
        style.visuals.window_stroke = Stroke::new(1.0, COLOR_BORDER);
        style.visuals.hyperlink_color = COLOR_ACCENT;
        style.visuals.selection.bg_fill = COLOR_ACCENT_HOVER;
        style.visuals.selection.stroke = Stroke::new(1.0, COLOR_ACCENT);
        style.visuals.text_edit_bg_color = Some(COLOR_BG_TERTIARY);

        style.visuals.widgets.noninteractive =
            widget(COLOR_BG_SECONDARY, COLOR_BORDER, COLOR_TEXT_SECONDARY, 0.0);
        style.visuals.widgets.inactive =
            widget(COLOR_BG_TERTIARY, COLOR_BORDER, COLOR_TEXT_PRIMARY, 0.0);
        style.visuals.widgets.hovered =
            widget(COLOR_ACCENT_HOVER, COLOR_ACCENT_HOVER, Color32::WHITE, 0.5);
        style.visuals.widgets.active = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.5);
        style.visuals.widgets.open = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.0);

        style.spacing.window_margin = Margin::same(12);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.interact_size.y = 30.0;
        style.spacing.combo_width = 220.0;

        style.text_styles.insert(
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
        style.text_styles.insert(
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
        self.style_applied = true;
    }
}
