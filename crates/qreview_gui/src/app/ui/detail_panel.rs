//! Central question detail panel and its navigation strip.

use super::super::*;
use eframe::egui::{self, RichText};
use qreview_core::consensus::Consensus;
use qreview_core::dashboard::NO_MATCHES_MESSAGE;
use qreview_core::models::StatusMutation;
use qreview_core::view::{ImageSection, PredictionKind};

/// User intent collected while drawing, applied once the frame's borrows end.
enum DetailAction {
    Mark(StatusMutation),
    Edit,
    ViewImage(String),
    BrowseImages,
    UploadImage,
    RemoveImage,
    Navigate(NavDirection),
}

fn prediction_color(kind: PredictionKind) -> egui::Color32 {
    match kind {
        PredictionKind::Match => COLOR_SUCCESS,
        PredictionKind::NoneCorrect | PredictionKind::NoClearSelection => COLOR_WARNING,
        PredictionKind::Error | PredictionKind::Wrong | PredictionKind::Invalid => COLOR_DANGER,
    }
}

fn consensus_color(consensus: Consensus) -> egui::Color32 {
    match consensus {
        Consensus::Full => COLOR_SUCCESS,
        Consensus::Majority { .. } => COLOR_WARNING,
        Consensus::Minority { .. } => COLOR_WARNING,
        Consensus::None => COLOR_DANGER,
    }
}

fn badge(ui: &mut egui::Ui, text: &str, fill: egui::Color32) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(egui::Color32::WHITE));
        });
}

fn choice_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| (b'A' + i) as char)
        .unwrap_or('?')
}

impl QReviewApp {
    fn render_navigation_bar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<DetailAction>) {
        let Some(position) = self.nav_position() else {
            return;
        };
        ui.horizontal(|ui| {
            if ui
                .add_enabled(position.prev.is_some(), egui::Button::new("◀ Prev"))
                .clicked()
            {
                actions.push(DetailAction::Navigate(NavDirection::Prev));
            }
            ui.label(RichText::new(position.count_label()).color(COLOR_TEXT_SECONDARY));
            if ui
                .add_enabled(position.next.is_some(), egui::Button::new("Next ▶"))
                .clicked()
            {
                actions.push(DetailAction::Navigate(NavDirection::Next));
            }
            ui.add(
                egui::ProgressBar::new(position.progress())
                    .desired_width(ui.available_width())
                    .desired_height(6.0),
            );
        });
    }

    fn track_swipe(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        if !self.modals.is_empty() || self.draft.is_some() {
            self.swipe.cancel();
            return;
        }
        let (pressed, released, position) = ctx.input(|input| {
            (
                input.pointer.any_pressed(),
                input.pointer.any_released(),
                input.pointer.interact_pos(),
            )
        });
        let Some(position) = position else {
            return;
        };
        if pressed && rect.contains(position) {
            self.swipe.begin(position.x);
        } else if released && self.swipe.is_tracking() {
            if let Some(direction) = self.swipe.end(position.x) {
                self.navigate(direction);
            }
        }
    }

    fn render_detail_view(&mut self, ui: &mut egui::Ui, actions: &mut Vec<DetailAction>) {
        let Some(view) = self.detail_view.clone() else {
            ui.label(RichText::new("Loading question...").color(COLOR_TEXT_MUTED));
            return;
        };

        ui.horizontal_wrapped(|ui| {
            ui.heading(&view.title);
            badge(ui, &view.status.label(), hex_color(view.status_color));
            if !view.category.is_empty() {
                badge(ui, &view.category, hex_color(view.category_color));
            }
        });
        if let Some(source) = &view.source {
            let mut meta = format!("File: {}", source.file_name);
            if let Some(page) = source.page {
                meta.push_str(&format!("  |  Page {}", page));
            }
            if let Some(number) = source.question_number {
                meta.push_str(&format!("  |  Question #{}", number));
            }
            ui.label(RichText::new(meta).small().color(COLOR_TEXT_SECONDARY))
                .on_hover_text(&source.file_path);
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for mutation in &view.actions {
                if ui
                    .add_enabled(
                        !self.mutation_in_flight,
                        egui::Button::new(mutation.button_label()),
                    )
                    .clicked()
                {
                    actions.push(DetailAction::Mark(*mutation));
                }
            }
            if ui.button("Edit").clicked() {
                actions.push(DetailAction::Edit);
            }
        });

        ui.add_space(8.0);
        ui.label(RichText::new(&view.text).size(17.0));

        ui.add_space(8.0);
        match &view.image {
            ImageSection::Attached { url } => {
                let full_url = self.asset_url(url);
                let image = egui::Image::new(full_url.clone())
                    .max_height(260.0)
                    .maintain_aspect_ratio(true)
                    .sense(egui::Sense::click());
                if ui.add(image).on_hover_text("Click to enlarge").clicked() {
                    actions.push(DetailAction::ViewImage(url.clone()));
                }
                ui.horizontal(|ui| {
                    if ui.button("View").clicked() {
                        actions.push(DetailAction::ViewImage(url.clone()));
                    }
                    if ui.button("Browse").clicked() {
                        actions.push(DetailAction::BrowseImages);
                    }
                    if ui
                        .add_enabled(!self.mutation_in_flight, egui::Button::new("Remove"))
                        .clicked()
                    {
                        actions.push(DetailAction::RemoveImage);
                    }
                });
            }
            ImageSection::Missing => {
                ui.horizontal(|ui| {
                    if ui.button("Select Image").clicked() {
                        actions.push(DetailAction::BrowseImages);
                    }
                    if ui
                        .add_enabled(!self.mutation_in_flight, egui::Button::new("Upload Image"))
                        .clicked()
                    {
                        actions.push(DetailAction::UploadImage);
                    }
                });
            }
        }
        let requirement_color = if view.requires_image {
            COLOR_WARNING
        } else {
            COLOR_TEXT_MUTED
        };
        ui.label(
            RichText::new(view.requirement_text())
                .small()
                .color(requirement_color),
        );

        ui.add_space(8.0);
        ui.label(RichText::new("Choices").strong());
        for (index, choice) in view.choices.iter().enumerate() {
            let text = format!("{}. {}", choice_letter(index), choice.text);
            if choice.correct {
                ui.label(RichText::new(format!("✔ {}", text)).color(COLOR_SUCCESS));
            } else {
                ui.label(RichText::new(format!("   {}", text)));
            }
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Explanation")
            .id_salt(("explanation", view.id))
            .default_open(false)
            .show(ui, |ui| {
                ui.label(&view.explanation);
            });
        egui::CollapsingHeader::new(format!("Model Predictions ({})", view.predictions.len()))
            .id_salt(("predictions", view.id))
            .default_open(false)
            .show(ui, |ui| {
                for line in &view.predictions {
                    ui.label(RichText::new(line.text()).color(prediction_color(line.kind)));
                }
            });
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("Consensus: {}", view.consensus_text()))
                .strong()
                .color(consensus_color(view.consensus)),
        );
    }

    fn apply_detail_actions(&mut self, actions: Vec<DetailAction>) {
        for action in actions {
            match action {
                DetailAction::Mark(mutation) => self.mark_status(mutation),
                DetailAction::Edit => self.begin_edit(),
                DetailAction::ViewImage(url) => self.open_image_viewer(&url),
                DetailAction::BrowseImages => self.open_image_browser(),
                DetailAction::UploadImage => self.pick_and_upload_image(),
                DetailAction::RemoveImage => self.confirm_remove_image(),
                DetailAction::Navigate(direction) => self.navigate(direction),
            }
        }
    }

    /// Renders the selected question, or the placeholder/error in its place.
    pub(crate) fn render_detail_panel(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let panel = egui::CentralPanel::default().show(ctx, |ui| {
            if self.list_error.is_some() {
                return;
            }
            if self.dashboard.is_loaded() && self.dashboard.selector().is_empty() {
                ui.label(RichText::new(NO_MATCHES_MESSAGE).color(COLOR_TEXT_MUTED));
                return;
            }
            if self.dashboard.selected().is_none() {
                return;
            }

            self.render_navigation_bar(ui, &mut actions);
            ui.separator();

            let mut scroll = egui::ScrollArea::vertical()
                .id_salt("detail_scroll")
                .auto_shrink([false; 2]);
            if self.scroll_to_top {
                scroll = scroll.vertical_scroll_offset(0.0);
                self.scroll_to_top = false;
            }
            scroll.show(ui, |ui| {
                if let Some(error) = &self.detail_error {
                    ui.label(RichText::new(error).color(COLOR_DANGER));
                } else if self.draft.is_some() {
                    self.render_edit_form(ui);
                } else {
                    self.render_detail_view(ui, &mut actions);
                }
            });
        });
        self.track_swipe(ctx, panel.response.rect);
        self.apply_detail_actions(actions);
    }
}
