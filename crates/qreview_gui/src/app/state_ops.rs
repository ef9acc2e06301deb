//! State transitions for backend events, selection, filters, and mutations.

use super::{Dialog, QReviewApp};
use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent, ErrorSurface, ImageChange};
use qreview_core::api::resolve_asset_url;
use qreview_core::browser::{BrowserLocation, ImageBrowser};
use qreview_core::dashboard::{FilterChange, Populate};
use qreview_core::draft::EditDraft;
use qreview_core::filter::FilterState;
use qreview_core::modal::Modal;
use qreview_core::models::{PageImage, QuestionId, QuestionStatus, StatusMutation};
use qreview_core::navigation::{NavDirection, NavPosition};
use qreview_core::view::DetailView;
use std::path::PathBuf;
use tracing::{debug, error, warn};

impl QReviewApp {
    fn send(&mut self, command: CoreCmd) -> bool {
        if self.backend.cmd_tx.send(command).is_ok() {
            return true;
        }
        error!("backend worker unavailable");
        self.set_status("Backend unavailable.");
        false
    }

    pub(super) fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::QuestionsLoaded { scope, page } => {
                if scope != self.dashboard.fetch_scope() && self.dashboard.is_loaded() {
                    debug!("dropping question list for stale scope {:?}", scope);
                    return;
                }
                self.questions_loading = false;
                self.list_error = None;
                let last_file = self.store.last_file_filter();
                self.dashboard
                    .apply_questions(page, scope, last_file.as_deref());
                self.dashboard.reconcile_filters();
                self.populate(true);
            }
            CoreEvent::DetailLoaded { id, detail, .. } => {
                if self.dashboard.selected() != Some(id) {
                    debug!("dropping detail for {} (no longer selected)", id);
                    return;
                }
                self.detail_loading = false;
                self.detail_error = None;
                let color = self.dashboard.category_color(&detail.category);
                self.detail_view = Some(DetailView::build(&detail, color));
                let editing_this = self
                    .draft
                    .as_ref()
                    .map(|draft| draft.question_id() == id)
                    .unwrap_or(false);
                if !editing_this {
                    self.draft = None;
                    if self.correction_mode {
                        self.draft = Some(EditDraft::from_detail(&detail));
                    }
                }
                self.detail = Some(detail);
            }
            CoreEvent::EditsSaved {
                id,
                update,
                marked_corrected,
            } => {
                self.mutation_in_flight = false;
                self.dashboard.patch_edit(
                    id,
                    &update.enhanced_text,
                    &update.category,
                    update.requires_image,
                );
                if self.draft.as_ref().map(EditDraft::question_id) == Some(id) {
                    self.draft = None;
                }
                if marked_corrected {
                    self.dashboard.patch_status(id, QuestionStatus::Corrected);
                    self.set_status(format!("Question {} saved and marked corrected.", id));
                    self.advance_after(id);
                } else {
                    self.set_status("Changes saved successfully.");
                    self.refresh_if_selected(id);
                }
            }
            CoreEvent::StatusMarked { id, mutation } => {
                self.mutation_in_flight = false;
                self.dashboard.patch_status(id, mutation.target());
                self.set_status(format!(
                    "Question {} marked as {}.",
                    id,
                    mutation.target().label()
                ));
                self.advance_after(id);
            }
            CoreEvent::ImageChanged {
                id,
                image_url,
                change,
            } => {
                self.mutation_in_flight = false;
                self.dashboard.patch_image(id, image_url);
                let message = match change {
                    ImageChange::Uploaded => "Image uploaded.",
                    ImageChange::Assigned => {
                        if let Some(location) = self.pending_image_location.take() {
                            self.store.set_last_image_location(&location);
                        }
                        self.modals.close_image_flow();
                        self.close_browser();
                        "Image selected."
                    }
                    ImageChange::Removed => "Image removed.",
                };
                self.set_status(message);
                self.refresh_if_selected(id);
            }
            CoreEvent::ExplanationGenerated { id, explanation } => {
                self.explanation_in_flight = false;
                match self.draft.as_mut() {
                    Some(draft) if draft.question_id() == id => draft.set_explanation(explanation),
                    _ => warn!("generated explanation for {} arrived with no open editor", id),
                }
            }
            CoreEvent::BrowserReady {
                id,
                detail,
                image_files,
            } => {
                let last_used = self.store.last_image_location();
                let Some(browser) = self.browser.as_mut().filter(|b| b.question_id() == id) else {
                    debug!("dropping image browser data for {}", id);
                    return;
                };
                let location = browser.open(&detail, last_used.as_ref());
                browser.extend_files(image_files);
                self.browser_detail = Some(detail);
                self.browser_error = None;
                if let Some(location) = location {
                    self.load_browser_location(location, true);
                }
            }
            CoreEvent::AvailablePagesLoaded { file, pages } => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.set_available_pages(&file, pages);
                }
            }
            CoreEvent::PageImagesLoaded { location, result } => {
                if let Some(browser) = self.browser.as_mut() {
                    if !browser.set_images(&location, result) {
                        debug!("dropping images for stale page {:?}", location);
                    }
                }
            }
            CoreEvent::Error { source, message } => self.apply_error(source, message),
        }
    }

    fn apply_error(&mut self, source: CoreErrorSource, message: String) {
        match source.surface() {
            ErrorSurface::Inline => match source {
                CoreErrorSource::Questions => {
                    self.questions_loading = false;
                    self.list_error = Some(message);
                }
                CoreErrorSource::Detail(id) if self.dashboard.selected() == Some(id) => {
                    self.detail_loading = false;
                    self.detail_view = None;
                    self.detail = None;
                    self.detail_error = Some(message);
                }
                CoreErrorSource::Browser(id)
                    if self.browser.as_ref().map(ImageBrowser::question_id) == Some(id) =>
                {
                    self.browser_error = Some(message);
                }
                other => debug!("dropping stale error for {:?}: {}", other, message),
            },
            ErrorSurface::Alert => {
                if matches!(source, CoreErrorSource::Explanation(_)) {
                    self.explanation_in_flight = false;
                } else {
                    self.mutation_in_flight = false;
                }
                if matches!(source, CoreErrorSource::Image(_)) {
                    self.pending_image_location = None;
                }
                self.show_alert(message);
            }
        }
    }

    /// Queue a fetch of the question collection for the active file filter.
    pub(super) fn request_questions(&mut self) {
        let scope = self.dashboard.fetch_scope();
        if self.send(CoreCmd::LoadQuestions { scope }) {
            self.questions_loading = true;
        }
    }

    fn populate(&mut self, preserve_selection: bool) {
        match self.dashboard.populate(preserve_selection) {
            Populate::Empty => self.clear_detail(),
            Populate::Show {
                id,
                preserve_scroll,
            } => self.show_question(id, preserve_scroll),
        }
    }

    fn clear_detail(&mut self) {
        self.detail = None;
        self.detail_view = None;
        self.detail_error = None;
        self.detail_loading = false;
        self.draft = None;
    }

    /// Request the detail for `id`; the current view stays up until it arrives
    /// when `id` is already displayed.
    pub(super) fn show_question(&mut self, id: QuestionId, preserve_scroll: bool) {
        if self.detail.as_ref().map(|detail| detail.id) != Some(id) {
            self.detail = None;
            self.detail_view = None;
            if self.draft.as_ref().map(EditDraft::question_id) != Some(id) {
                self.draft = None;
            }
        }
        self.detail_error = None;
        self.scroll_to_top = !preserve_scroll;
        let scope = self.dashboard.fetch_scope();
        if self.send(CoreCmd::LoadDetail { id, scope }) {
            self.detail_loading = true;
        }
    }

    fn refresh_if_selected(&mut self, id: QuestionId) {
        if self.dashboard.selected() == Some(id) {
            self.show_question(id, true);
        }
    }

    fn advance_after(&mut self, id: QuestionId) {
        match self.dashboard.advance_after(id) {
            Some(next) => self.show_question(next, true),
            None => self.clear_detail(),
        }
    }

    /// Selector click: show the chosen question, keeping the panel's scroll offset.
    pub(super) fn select_question(&mut self, id: QuestionId) {
        if self.dashboard.selected() == Some(id) {
            return;
        }
        if self.dashboard.select(id) {
            self.show_question(id, true);
        } else {
            warn!("question {} is not in the current selector", id);
        }
    }

    pub(super) fn nav_position(&self) -> Option<NavPosition> {
        let current = self.dashboard.selected()?;
        Some(NavPosition::compute(&self.dashboard.selector_ids(), current))
    }

    pub(super) fn navigate(&mut self, direction: NavDirection) {
        let Some(position) = self.nav_position() else {
            return;
        };
        let target = match direction {
            NavDirection::Prev => position.prev,
            NavDirection::Next => position.next,
        };
        if let Some(target) = target {
            if self.dashboard.select(target) {
                self.show_question(target, true);
            }
        }
    }

    /// Apply an edited filter snapshot: persist it, then repopulate or refetch.
    pub(super) fn update_filters(&mut self, filters: FilterState) {
        match self.dashboard.set_filters(filters) {
            FilterChange::Unchanged => {}
            FilterChange::Repopulate => {
                self.store.save_filters(self.dashboard.filters());
                self.populate(false);
            }
            FilterChange::Refetch => {
                self.store.save_filters(self.dashboard.filters());
                self.request_questions();
            }
        }
    }

    pub(super) fn set_correction_mode(&mut self, enabled: bool) {
        self.correction_mode = enabled;
        self.store.set_correction_mode(enabled);
        if enabled && self.draft.is_none() {
            self.begin_edit();
        }
    }

    pub(super) fn begin_edit(&mut self) {
        match self.detail.as_ref() {
            Some(detail) => self.draft = Some(EditDraft::from_detail(detail)),
            None => warn!("edit requested with no question loaded"),
        }
    }

    pub(super) fn cancel_edit(&mut self) {
        if self.draft_is_dirty() {
            self.dialog = Some(Dialog::ConfirmDiscardEdits);
        } else {
            self.draft = None;
        }
    }

    pub(super) fn discard_edits(&mut self) {
        self.draft = None;
    }

    pub(super) fn save_edits(&mut self, mark_corrected: bool) {
        let Some(draft) = self.draft.as_ref() else {
            warn!("save requested with no open editor");
            return;
        };
        let id = draft.question_id();
        match draft.to_update_request() {
            Ok(update) => {
                if self.send(CoreCmd::SaveEdits {
                    id,
                    update,
                    mark_corrected,
                }) {
                    self.mutation_in_flight = true;
                }
            }
            Err(err) => self.show_alert(err.to_string()),
        }
    }

    pub(super) fn generate_explanation(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            warn!("explanation requested with no open editor");
            return;
        };
        let id = draft.question_id();
        match draft.to_explanation_request() {
            Ok(request) => {
                if self.send(CoreCmd::GenerateExplanation { id, request }) {
                    self.explanation_in_flight = true;
                }
            }
            Err(err) => self.show_alert(err.to_string()),
        }
    }

    pub(super) fn mark_status(&mut self, mutation: StatusMutation) {
        let Some(id) = self.dashboard.selected() else {
            warn!("status change requested with no selection");
            return;
        };
        if self.send(CoreCmd::MarkStatus { id, mutation }) {
            self.mutation_in_flight = true;
        }
    }

    pub(super) fn upload_image_from(&mut self, path: PathBuf) {
        let Some(id) = self.dashboard.selected() else {
            warn!("image upload requested with no selection");
            return;
        };
        if self.send(CoreCmd::UploadImage { id, path }) {
            self.mutation_in_flight = true;
        }
    }

    pub(super) fn pick_and_upload_image(&mut self) {
        let dialog = rfd::FileDialog::new()
            .set_title("Upload question image")
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"]);
        if let Some(path) = dialog.pick_file() {
            self.upload_image_from(path);
        }
    }

    pub(super) fn confirm_remove_image(&mut self) {
        match self.dashboard.selected() {
            Some(id) => self.dialog = Some(Dialog::ConfirmRemoveImage { id }),
            None => warn!("image removal requested with no selection"),
        }
    }

    pub(super) fn remove_image(&mut self, id: QuestionId) {
        if self.send(CoreCmd::RemoveImage { id }) {
            self.mutation_in_flight = true;
        }
    }

    /// Absolute URL for an image path reported by the server.
    pub(super) fn asset_url(&self, raw: &str) -> String {
        resolve_asset_url(&self.api_base, raw)
    }

    pub(super) fn open_image_viewer(&mut self, url: &str) {
        let url = self.asset_url(url);
        self.modals.push(Modal::ImageViewer { url });
    }

    pub(super) fn open_image_browser(&mut self) {
        let Some(id) = self.dashboard.selected() else {
            warn!("image browser requested with no selection");
            return;
        };
        let scope = self.dashboard.fetch_scope();
        self.browser = Some(ImageBrowser::new(id, scope.clone()));
        self.browser_detail = None;
        self.browser_error = None;
        self.modals.close_image_flow();
        self.modals.push(Modal::ImageBrowser { question_id: id });
        self.send(CoreCmd::OpenBrowser { id, scope });
    }

    pub(super) fn close_browser(&mut self) {
        self.browser = None;
        self.browser_detail = None;
        self.browser_error = None;
        self.modals.close_image_flow();
    }

    fn load_browser_location(&mut self, location: BrowserLocation, refresh_pages: bool) {
        if refresh_pages {
            let file = location.file.clone();
            self.send(CoreCmd::LoadAvailablePages { file });
        }
        self.send(CoreCmd::LoadPageImages { location });
    }

    pub(super) fn browser_select_file(&mut self, file: &str) {
        let (Some(browser), Some(detail)) = (self.browser.as_mut(), self.browser_detail.as_ref())
        else {
            return;
        };
        if let Some(location) = browser.select_file(detail, file) {
            self.load_browser_location(location, true);
        }
    }

    pub(super) fn browser_step(&mut self, direction: NavDirection) {
        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        let location = match direction {
            NavDirection::Prev => browser.prev_page(),
            NavDirection::Next => browser.next_page(),
        };
        if let Some(location) = location {
            self.load_browser_location(location, false);
        }
    }

    pub(super) fn preview_image(&mut self, image: PageImage) {
        let Some(question_id) = self.browser.as_ref().map(ImageBrowser::question_id) else {
            return;
        };
        self.modals.push(Modal::ImagePreview { question_id, image });
    }

    /// Attach `image` to the question. The page it came from is remembered only
    /// after the server accepts the assignment.
    pub(super) fn select_browser_image(&mut self, question_id: QuestionId, image: PageImage) {
        if self.mutation_in_flight {
            debug!("image selection for {} ignored while a change is pending", question_id);
            return;
        }
        if self.send(CoreCmd::AssignImage {
            id: question_id,
            image_url: image.url,
        }) {
            self.mutation_in_flight = true;
            self.pending_image_location = self.browser.as_ref().and_then(ImageBrowser::last_used);
        }
    }

    /// Resolve the confirmation dialog currently on screen.
    pub(super) fn resolve_dialog(&mut self, confirmed: bool) -> Option<Dialog> {
        let dialog = self.dialog.take()?;
        if confirmed {
            match &dialog {
                Dialog::Alert { .. } => {}
                Dialog::ConfirmDiscardEdits => self.discard_edits(),
                Dialog::ConfirmRemoveImage { id } => self.remove_image(*id),
                Dialog::ConfirmClose => self.close_confirmed = true,
            }
        }
        Some(dialog)
    }
}
