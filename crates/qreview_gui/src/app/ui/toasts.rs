//! Short-lived confirmations after saves, status marks, and image changes.

use super::super::*;
use eframe::egui::{self, RichText};

const TOAST_FADE: Duration = Duration::from_millis(800);

/// Opacity for a toast expiring at `expires_at`; fades over the final [`TOAST_FADE`].
fn toast_opacity(expires_at: Instant, now: Instant) -> f32 {
    let remaining = expires_at.saturating_duration_since(now);
    (remaining.as_secs_f32() / TOAST_FADE.as_secs_f32()).clamp(0.0, 1.0)
}

impl QReviewApp {
    pub(crate) fn render_toasts(&mut self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        let now = Instant::now();

        egui::Area::new(egui::Id::new("qreview_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                for toast in &self.toasts {
                    let opacity = toast_opacity(toast.expires_at, now);
                    let accent = COLOR_SUCCESS.gamma_multiply(opacity);
                    egui::Frame::new()
                        .fill(COLOR_BG_TERTIARY.gamma_multiply(opacity))
                        .stroke(egui::Stroke::new(1.0, accent))
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("✔").color(accent));
                                ui.label(
                                    RichText::new(&toast.text)
                                        .color(COLOR_TEXT_PRIMARY.gamma_multiply(opacity)),
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_fades_only_near_expiry() {
        let now = Instant::now();
        assert_eq!(toast_opacity(now + Duration::from_secs(3), now), 1.0);
        assert_eq!(toast_opacity(now, now), 0.0);
        let half = toast_opacity(now + TOAST_FADE / 2, now);
        assert!((half - 0.5).abs() < 0.01, "{}", half);
    }
}
