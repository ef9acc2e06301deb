//! Native egui app shell for the question review dashboard.

mod state_feedback;
mod state_ops;
mod style;
mod ui;

use crate::backend::{spawn_backend, BackendHandle};
use eframe::egui;
use qreview_core::browser::{ImageBrowser, LastImageLocation};
use qreview_core::draft::EditDraft;
use qreview_core::modal::{Modal, ModalAction, ModalKey, ModalStack};
use qreview_core::models::{QuestionDetail, QuestionId};
use qreview_core::navigation::{NavDirection, SwipeTracker};
use qreview_core::storage::FilterStore;
use qreview_core::view::DetailView;
use qreview_core::{ApiClient, AppError, Config, DashboardState};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use style::*;
use tracing::info;

/// Native egui application shell for the review dashboard.
///
/// Owns the dashboard state and talks to the background worker over channels
/// so the `update` loop never blocks on HTTP.
pub(crate) struct QReviewApp {
    backend: BackendHandle,
    store: FilterStore,
    api_base: String,
    dashboard: DashboardState,
    questions_loading: bool,
    list_error: Option<String>,
    detail: Option<QuestionDetail>,
    detail_view: Option<DetailView>,
    detail_loading: bool,
    detail_error: Option<String>,
    scroll_to_top: bool,
    draft: Option<EditDraft>,
    correction_mode: bool,
    mutation_in_flight: bool,
    explanation_in_flight: bool,
    browser: Option<ImageBrowser>,
    browser_detail: Option<QuestionDetail>,
    browser_error: Option<String>,
    /// Page the in-flight image assignment came from; persisted once it succeeds.
    pending_image_location: Option<LastImageLocation>,
    modals: ModalStack,
    swipe: SwipeTracker,
    dialog: Option<Dialog>,
    close_confirmed: bool,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    style_applied: bool,
    window_checked: bool,
}

/// Blocking dialogs shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Dialog {
    Alert { message: String },
    ConfirmDiscardEdits,
    ConfirmRemoveImage { id: QuestionId },
    ConfirmClose,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
struct ToastMessage {
    text: String,
    expires_at: Instant,
}

const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 820.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

impl QReviewApp {
    /// Build the app from environment configuration and start the backend worker.
    ///
    /// # Returns
    /// A ready app with the initial question fetch already queued.
    ///
    /// # Errors
    /// Returns an error if the configured API URL is unusable.
    pub(crate) fn new() -> Result<Self, AppError> {
        let config = Config::from_env();
        let api = ApiClient::from_config(&config)?;
        info!("review dashboard using API at {}", config.api_url);
        let store = FilterStore::open_or_memory(&config.state_path);
        let backend = spawn_backend(api);
        let mut app = Self::with_parts(backend, store, config.api_url);
        app.request_questions();
        Ok(app)
    }

    fn with_parts(backend: BackendHandle, store: FilterStore, api_base: String) -> Self {
        let dashboard = DashboardState::new(store.load_filters());
        let correction_mode = store.correction_mode();
        Self {
            backend,
            store,
            api_base,
            dashboard,
            questions_loading: false,
            list_error: None,
            detail: None,
            detail_view: None,
            detail_loading: false,
            detail_error: None,
            scroll_to_top: false,
            draft: None,
            correction_mode,
            mutation_in_flight: false,
            explanation_in_flight: false,
            browser: None,
            browser_detail: None,
            browser_error: None,
            pending_image_location: None,
            modals: ModalStack::default(),
            swipe: SwipeTracker::default(),
            dialog: None,
            close_confirmed: false,
            status: None,
            toasts: VecDeque::new(),
            style_applied: false,
            window_checked: false,
        }
    }

    fn draft_is_dirty(&self) -> bool {
        self.draft.as_ref().map(EditDraft::is_dirty).unwrap_or(false)
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|input| input.viewport().close_requested()) {
            return;
        }
        if self.close_confirmed || !self.draft_is_dirty() {
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        self.dialog = Some(Dialog::ConfirmClose);
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if self.dialog.is_some() {
            return;
        }
        if !self.modals.is_empty() {
            let escape = ctx.input(|input| input.key_pressed(egui::Key::Escape));
            let enter = ctx.input(|input| input.key_pressed(egui::Key::Enter));
            if escape {
                let action = self.modals.handle_key(ModalKey::Escape);
                self.apply_modal_action(action);
            } else if enter {
                let action = self.modals.handle_key(ModalKey::Enter);
                self.apply_modal_action(action);
            }
            return;
        }
        let text_focused = ctx.memory(|memory| memory.focused().is_some());
        if text_focused || self.draft.is_some() {
            return;
        }
        if ctx.input(|input| input.key_pressed(egui::Key::ArrowLeft)) {
            self.navigate(NavDirection::Prev);
        } else if ctx.input(|input| input.key_pressed(egui::Key::ArrowRight)) {
            self.navigate(NavDirection::Next);
        }
    }

    fn apply_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::Ignored => {}
            ModalAction::Dismissed(Modal::ImageBrowser { .. }) => self.close_browser(),
            ModalAction::Dismissed(_) => {}
            ModalAction::SelectImage { question_id, image } => {
                self.select_browser_image(question_id, image)
            }
        }
    }
}

impl eframe::App for QReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        if !self.window_checked {
            let min_size = egui::vec2(MIN_WINDOW_SIZE[0], MIN_WINDOW_SIZE[1]);
            let current_size = ctx.input(|input| {
                input
                    .viewport()
                    .inner_rect
                    .map(|rect| rect.size())
                    .unwrap_or(min_size)
            });
            if current_size.x < min_size.x || current_size.y < min_size.y {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(min_size));
            }
            self.window_checked = true;
        }

        self.expire_feedback(Instant::now());

        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }

        self.handle_close_request(ctx);
        self.handle_keyboard(ctx);

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        self.render_sidebar(ctx);
        self.render_detail_panel(ctx);
        self.render_modals(ctx);
        self.render_dialog(ctx);
        self.render_toasts(ctx);

        let waiting = self.questions_loading
            || self.detail_loading
            || self.mutation_in_flight
            || self.explanation_in_flight
            || self.browser.is_some()
            || !self.toasts.is_empty()
            || self.status.is_some();
        if waiting {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests;
