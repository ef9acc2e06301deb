//! Inline edit form bound to the open [`EditDraft`].

use super::super::*;
use eframe::egui::{self, RichText};

enum EditAction {
    Save { mark_corrected: bool },
    Cancel,
    GenerateExplanation,
}

impl QReviewApp {
    pub(crate) fn render_edit_form(&mut self, ui: &mut egui::Ui) {
        let busy = self.mutation_in_flight;
        let generating = self.explanation_in_flight;
        let mut action = None;
        let Some(draft) = self.draft.as_mut() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(format!("Editing Question {}", draft.question_id()));
            if draft.is_dirty() {
                ui.label(RichText::new("● unsaved").small().color(COLOR_WARNING));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(EditAction::Cancel);
                }
                if ui
                    .add_enabled(!busy, egui::Button::new("Save & Mark Correct"))
                    .clicked()
                {
                    action = Some(EditAction::Save {
                        mark_corrected: true,
                    });
                }
                if ui.add_enabled(!busy, egui::Button::new("Save")).clicked() {
                    action = Some(EditAction::Save {
                        mark_corrected: false,
                    });
                }
            });
        });
        ui.separator();

        ui.label(RichText::new("Question text").small().color(COLOR_TEXT_MUTED));
        ui.add(
            egui::TextEdit::multiline(&mut draft.fields_mut().enhanced_text)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            ui.label(RichText::new("Category").small().color(COLOR_TEXT_MUTED));
            ui.add(egui::TextEdit::singleline(&mut draft.fields_mut().category));
            ui.checkbox(&mut draft.fields_mut().requires_image, "Requires image");
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Choices").small().color(COLOR_TEXT_MUTED));
        let mut remove: Option<usize> = None;
        let mut mark_correct: Option<usize> = None;
        let correct = draft.fields().correct_index;
        for index in 0..draft.fields().choices.len() {
            ui.horizontal(|ui| {
                if ui.radio(correct == Some(index), "").clicked() {
                    mark_correct = Some(index);
                }
                if let Some(choice) = draft.fields_mut().choices.get_mut(index) {
                    ui.add(
                        egui::TextEdit::singleline(choice)
                            .hint_text("Choice text")
                            .desired_width(ui.available_width() - 40.0),
                    );
                }
                if ui.small_button("✕").on_hover_text("Remove choice").clicked() {
                    remove = Some(index);
                }
            });
        }
        if let Some(index) = mark_correct {
            draft.set_correct(index);
        }
        if let Some(index) = remove {
            draft.remove_choice(index);
        }
        if ui.button("+ Add Choice").clicked() {
            draft.add_choice();
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Explanation").small().color(COLOR_TEXT_MUTED));
            let label = if generating {
                "Generating..."
            } else {
                "Generate Explanation"
            };
            if ui
                .add_enabled(!generating, egui::Button::new(label))
                .clicked()
            {
                action = Some(EditAction::GenerateExplanation);
            }
        });
        ui.add(
            egui::TextEdit::multiline(&mut draft.fields_mut().explanation)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        match action {
            Some(EditAction::Save { mark_corrected }) => self.save_edits(mark_corrected),
            Some(EditAction::Cancel) => self.cancel_edit(),
            Some(EditAction::GenerateExplanation) => self.generate_explanation(),
            None => {}
        }
    }
}
