//! Top bar and sidebar rendering: filters and the question selector.

use super::super::*;
use eframe::egui::{self, RichText};
use qreview_core::dashboard::NO_MATCHES_MESSAGE;
use qreview_core::filter::{FilterState, RequiresImage};

/// Combo box over `(value, display)` options with a leading "All" entry.
fn option_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    selected: &mut Option<String>,
    options: &[(String, String)],
) -> bool {
    let selected_text = selected
        .as_ref()
        .and_then(|value| options.iter().find(|(v, _)| v == value))
        .map(|(_, display)| display.clone())
        .or_else(|| selected.clone())
        .unwrap_or_else(|| "All".to_string());
    let mut changed = false;
    ui.label(RichText::new(label).small().color(COLOR_TEXT_MUTED));
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            changed |= ui.selectable_value(selected, None, "All").changed();
            for (value, display) in options {
                changed |= ui
                    .selectable_value(selected, Some(value.clone()), display.as_str())
                    .changed();
            }
        });
    changed
}

fn paired(values: Vec<String>) -> Vec<(String, String)> {
    values
        .into_iter()
        .map(|value| (value.clone(), value.replace('_', " ")))
        .collect()
}

impl QReviewApp {
    pub(crate) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("QReview").color(COLOR_ACCENT));
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!(
                            "{} questions loaded",
                            self.dashboard.questions().len()
                        ))
                        .color(COLOR_TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(!self.questions_loading, egui::Button::new("Reload"))
                            .clicked()
                        {
                            self.request_questions();
                        }
                        let mut correction_mode = self.correction_mode;
                        if ui
                            .checkbox(&mut correction_mode, "Correction mode")
                            .changed()
                        {
                            self.set_correction_mode(correction_mode);
                        }
                    });
                });
            });
    }

    fn render_filters(&mut self, ui: &mut egui::Ui) {
        let mut filters: FilterState = self.dashboard.filters().clone();
        let mut changed = false;

        changed |= option_combo(
            ui,
            "filter_status",
            "Status",
            &mut filters.status,
            &paired(self.dashboard.status_options()),
        );
        changed |= option_combo(
            ui,
            "filter_category",
            "Category",
            &mut filters.category,
            &self
                .dashboard
                .category_options()
                .into_iter()
                .map(|category| (category.clone(), category))
                .collect::<Vec<_>>(),
        );
        changed |= option_combo(
            ui,
            "filter_file",
            "Source file",
            &mut filters.file_path,
            &self.dashboard.file_options(),
        );

        ui.label(RichText::new("Requires image").small().color(COLOR_TEXT_MUTED));
        ui.horizontal(|ui| {
            for (value, text) in [
                (RequiresImage::All, "All"),
                (RequiresImage::Yes, "Yes"),
                (RequiresImage::No, "No"),
            ] {
                changed |= ui
                    .selectable_value(&mut filters.requires_image, value, text)
                    .changed();
            }
        });

        ui.label(RichText::new("Search").small().color(COLOR_TEXT_MUTED));
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut filters.search)
                    .hint_text("Text, duplicate text, or id")
                    .desired_width(f32::INFINITY),
            )
            .changed();

        if changed {
            self.update_filters(filters);
        }
    }

    pub(crate) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .default_width(340.0)
            .min_width(260.0)
            .show(ctx, |ui| {
                self.render_filters(ui);
                ui.add_space(8.0);
                ui.separator();

                if let Some(error) = &self.list_error {
                    ui.label(RichText::new(error).color(COLOR_DANGER));
                    return;
                }
                if !self.dashboard.is_loaded() {
                    ui.label(RichText::new("Loading questions...").color(COLOR_TEXT_MUTED));
                    return;
                }
                let entries = self.dashboard.selector();
                if entries.is_empty() {
                    ui.label(RichText::new(NO_MATCHES_MESSAGE).color(COLOR_TEXT_MUTED));
                    return;
                }
                ui.label(
                    RichText::new(format!("Questions ({})", entries.len()))
                        .color(COLOR_TEXT_PRIMARY),
                );

                let selected_id = self.dashboard.selected();
                let mut pending_select: Option<QuestionId> = None;
                let row_height = ui.spacing().interact_size.y;
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show_rows(ui, row_height, entries.len(), |ui, range| {
                        for entry in &entries[range] {
                            let selected = selected_id == Some(entry.id);
                            let text = RichText::new(&entry.label)
                                .color(hex_color(entry.status.color_hex()));
                            if ui.selectable_label(selected, text).clicked() {
                                pending_select = Some(entry.id);
                            }
                        }
                    });
                if let Some(id) = pending_select {
                    self.select_question(id);
                }
            });
    }
}
