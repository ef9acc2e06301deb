//! Alert and confirmation dialogs.

use super::super::*;
use eframe::egui::{self, RichText};

pub(crate) const DISCARD_EDITS_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to cancel?";
pub(crate) const REMOVE_IMAGE_PROMPT: &str = "Are you sure you want to remove this image?";
pub(crate) const CLOSE_WINDOW_PROMPT: &str =
    "You have unsaved changes. Close the window and discard them?";

impl QReviewApp {
    pub(crate) fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };
        let (title, body, confirm_label) = match &dialog {
            Dialog::Alert { message } => ("Error", message.as_str(), None),
            Dialog::ConfirmDiscardEdits => {
                ("Discard changes", DISCARD_EDITS_PROMPT, Some("Discard"))
            }
            Dialog::ConfirmRemoveImage { .. } => {
                ("Remove image", REMOVE_IMAGE_PROMPT, Some("Remove"))
            }
            Dialog::ConfirmClose => ("Unsaved changes", CLOSE_WINDOW_PROMPT, Some("Close")),
        };

        let mut answer: Option<bool> = None;
        egui::Modal::new(egui::Id::new("qreview_dialog")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading(title);
            ui.add_space(6.0);
            ui.label(RichText::new(body).color(COLOR_TEXT_PRIMARY));
            ui.add_space(10.0);
            ui.horizontal(|ui| match confirm_label {
                Some(label) => {
                    if ui.button(label).clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked()
                        || ui.input(|input| input.key_pressed(egui::Key::Escape))
                    {
                        answer = Some(false);
                    }
                }
                None => {
                    if ui.button("OK").clicked()
                        || ui.input(|input| {
                            input.key_pressed(egui::Key::Escape)
                                || input.key_pressed(egui::Key::Enter)
                        })
                    {
                        answer = Some(true);
                    }
                }
            });
        });

        if let Some(confirmed) = answer {
            if let Some(Dialog::ConfirmClose) = self.resolve_dialog(confirmed) {
                if confirmed {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }
}
