//! Image viewer, page-image browser, and selection preview modals.
//!
//! Modals are drawn in [`ModalStack`] order so the newest one sits on top;
//! only the top modal reacts to outside clicks.

use super::super::*;
use eframe::egui::{self, RichText};
use qreview_core::browser::{thumbnail_caption, ImagesState, NO_IMAGES_MESSAGE};
use qreview_core::models::PageImage;

enum ModalUiAction {
    ClickOutside,
    CloseTop,
    CloseImageFlow,
    SelectFile(String),
    Step(NavDirection),
    Preview(PageImage),
    Select {
        question_id: QuestionId,
        image: PageImage,
    },
}

const THUMBNAIL_SIZE: f32 = 160.0;

impl QReviewApp {
    fn render_viewer(&self, ui: &mut egui::Ui, url: &str, actions: &mut Vec<ModalUiAction>) {
        let max = ui.ctx().screen_rect().size() * 0.85;
        ui.add(
            egui::Image::new(url.to_string())
                .max_size(max)
                .maintain_aspect_ratio(true),
        );
        ui.vertical_centered(|ui| {
            if ui.button("Close").clicked() {
                actions.push(ModalUiAction::CloseTop);
            }
        });
    }

    fn render_browser(&self, ui: &mut egui::Ui, actions: &mut Vec<ModalUiAction>) {
        let Some(browser) = self.browser.as_ref() else {
            return;
        };
        ui.set_min_width(720.0);
        ui.horizontal(|ui| {
            ui.heading(format!("Select Image for Question {}", browser.question_id()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✕").on_hover_text("Close").clicked() {
                    actions.push(ModalUiAction::CloseImageFlow);
                }
            });
        });
        if let Some(error) = &self.browser_error {
            ui.label(RichText::new(error).color(COLOR_DANGER));
            return;
        }
        if self.browser_detail.is_none() {
            ui.spinner();
            return;
        }

        let current_file = browser.current().map(|location| location.file.clone());
        if !browser.files().is_empty() {
            let selected_text = browser
                .files()
                .iter()
                .find(|choice| Some(&choice.path) == current_file.as_ref())
                .map(|choice| choice.name.clone())
                .unwrap_or_else(|| "Choose a file".to_string());
            egui::ComboBox::from_id_salt("browser_file")
                .width(360.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for choice in browser.files() {
                        let selected = Some(&choice.path) == current_file.as_ref();
                        if ui.selectable_label(selected, &choice.name).clicked() && !selected {
                            actions.push(ModalUiAction::SelectFile(choice.path.clone()));
                        }
                    }
                });
        }
        if let Some(message) = browser.message() {
            ui.label(RichText::new(message).color(COLOR_TEXT_MUTED));
            return;
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(browser.can_prev(), egui::Button::new("◀ Prev page"))
                .clicked()
            {
                actions.push(ModalUiAction::Step(NavDirection::Prev));
            }
            if let Some(caption) = browser.page_caption() {
                ui.label(RichText::new(caption).color(COLOR_TEXT_SECONDARY));
            }
            if ui
                .add_enabled(browser.can_next(), egui::Button::new("Next page ▶"))
                .clicked()
            {
                actions.push(ModalUiAction::Step(NavDirection::Next));
            }
        });
        ui.separator();

        match browser.images() {
            ImagesState::Idle => {}
            ImagesState::Loading => {
                ui.spinner();
            }
            ImagesState::Failed(message) => {
                ui.label(RichText::new(message).color(COLOR_DANGER));
            }
            ImagesState::Loaded(page) if page.images.is_empty() => {
                ui.label(RichText::new(NO_IMAGES_MESSAGE).color(COLOR_TEXT_MUTED));
            }
            ImagesState::Loaded(page) => {
                egui::ScrollArea::vertical()
                    .id_salt("browser_images")
                    .max_height(ui.ctx().screen_rect().height() * 0.6)
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            for image in &page.images {
                                let stroke = if image.is_question_image {
                                    egui::Stroke::new(3.0, COLOR_ACCENT)
                                } else {
                                    egui::Stroke::new(1.0, COLOR_BORDER)
                                };
                                egui::Frame::new()
                                    .stroke(stroke)
                                    .inner_margin(egui::Margin::same(4))
                                    .show(ui, |ui| {
                                        ui.vertical(|ui| {
                                            let thumbnail =
                                                egui::Image::new(self.asset_url(&image.url))
                                                    .max_size(egui::vec2(
                                                        THUMBNAIL_SIZE,
                                                        THUMBNAIL_SIZE,
                                                    ))
                                                    .sense(egui::Sense::click());
                                            if ui.add(thumbnail).clicked() {
                                                actions.push(ModalUiAction::Preview(image.clone()));
                                            }
                                            ui.label(
                                                RichText::new(thumbnail_caption(image)).small(),
                                            );
                                        });
                                    });
                            }
                        });
                    });
            }
        }
    }

    fn render_preview(
        &self,
        ui: &mut egui::Ui,
        question_id: QuestionId,
        image: &PageImage,
        actions: &mut Vec<ModalUiAction>,
    ) {
        ui.heading(thumbnail_caption(image));
        let max = ui.ctx().screen_rect().size() * 0.7;
        ui.add(
            egui::Image::new(self.asset_url(&image.url))
                .max_size(max)
                .maintain_aspect_ratio(true),
        );
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.mutation_in_flight, egui::Button::new("Select"))
                .clicked()
            {
                actions.push(ModalUiAction::Select {
                    question_id,
                    image: image.clone(),
                });
            }
            if ui.button("Cancel").clicked() {
                actions.push(ModalUiAction::CloseTop);
            }
            if ui.button("Close").clicked() {
                actions.push(ModalUiAction::CloseImageFlow);
            }
        });
    }

    pub(crate) fn render_modals(&mut self, ctx: &egui::Context) {
        if self.modals.is_empty() {
            return;
        }
        let mut actions = Vec::new();
        let stack: Vec<Modal> = self.modals.iter().cloned().collect();
        for (depth, modal) in stack.iter().enumerate() {
            let response = egui::Modal::new(egui::Id::new(("qreview_modal", depth))).show(
                ctx,
                |ui| match modal {
                    Modal::ImageViewer { url } => self.render_viewer(ui, url, &mut actions),
                    Modal::ImageBrowser { .. } => self.render_browser(ui, &mut actions),
                    Modal::ImagePreview { question_id, image } => {
                        self.render_preview(ui, *question_id, image, &mut actions)
                    }
                },
            );
            if response.is_top_modal && response.backdrop_response.clicked() {
                actions.push(ModalUiAction::ClickOutside);
            }
        }

        for action in actions {
            match action {
                ModalUiAction::ClickOutside => {
                    let action = self.modals.click_outside();
                    self.apply_modal_action(action);
                }
                ModalUiAction::CloseTop => {
                    if let Some(modal) = self.modals.pop() {
                        self.apply_modal_action(ModalAction::Dismissed(modal));
                    }
                }
                ModalUiAction::CloseImageFlow => self.close_browser(),
                ModalUiAction::SelectFile(file) => self.browser_select_file(&file),
                ModalUiAction::Step(direction) => self.browser_step(direction),
                ModalUiAction::Preview(image) => self.preview_image(image),
                ModalUiAction::Select { question_id, image } => {
                    self.select_browser_image(question_id, image)
                }
            }
        }
    }
}
