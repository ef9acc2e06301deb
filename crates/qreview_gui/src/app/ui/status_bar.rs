//! Bottom status bar with request state, edit state, and API endpoint.

use super::super::*;
use eframe::egui;

impl QReviewApp {
    /// Renders the bottom status bar.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut has_primary_item = false;
                    if let Some(draft) = &self.draft {
                        let (label, color) = if self.mutation_in_flight {
                            ("Saving...", COLOR_TEXT_MUTED)
                        } else if draft.is_dirty() {
                            ("Unsaved changes", COLOR_WARNING)
                        } else {
                            ("No changes", COLOR_TEXT_SECONDARY)
                        };
                        ui.label(egui::RichText::new(label).color(color));
                        has_primary_item = true;
                    } else if self.questions_loading || self.detail_loading {
                        ui.label(egui::RichText::new("Loading...").color(COLOR_TEXT_MUTED));
                        has_primary_item = true;
                    }
                    if let Some(status) = &self.status {
                        if has_primary_item {
                            ui.separator();
                        }
                        ui.label(egui::RichText::new(&status.text).color(COLOR_WARNING));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("API: {}", self.api_base))
                                .small()
                                .color(COLOR_TEXT_SECONDARY),
                        );
                        if self.correction_mode {
                            ui.separator();
                            ui.label(
                                egui::RichText::new("Correction mode")
                                    .small()
                                    .color(COLOR_ACCENT),
                            );
                        }
                    });
                });
            });
    }
}
