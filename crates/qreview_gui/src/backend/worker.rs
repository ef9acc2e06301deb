//! Background worker thread for REST API access.

mod images;
mod mutations;
mod questions;

use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use qreview_core::cache::{DetailCache, PageImagesCache};
use qreview_core::config::env_flag_enabled;
use qreview_core::ApiClient;
use std::thread;
use tracing::info;

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Wrap externally owned channels so app-state tests can run without a worker.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

pub(super) struct WorkerState {
    api: ApiClient,
    evt_tx: Sender<CoreEvent>,
    details: DetailCache,
    page_images: PageImagesCache,
    perf_log_enabled: bool,
}

impl WorkerState {
    fn emit(&self, event: CoreEvent) {
        let _ = self.evt_tx.send(event);
    }
}

fn send_error(evt_tx: &Sender<CoreEvent>, source: CoreErrorSource, message: String) {
    let _ = evt_tx.send(CoreEvent::Error { source, message });
}

fn log_cache_perf(state: &WorkerState, op: &str, cache_hit: bool, elapsed_ms: f64) {
    if !state.perf_log_enabled {
        return;
    }
    let details = state.details.stats();
    let images = state.page_images.stats();
    info!(
        target: "qreview_gui::backend_perf",
        op = op,
        cache_hit = cache_hit,
        elapsed_ms = elapsed_ms,
        detail_hits = details.hits,
        detail_misses = details.misses,
        detail_invalidations = details.invalidations,
        image_hits = images.hits,
        image_misses = images.misses,
        "backend cache perf"
    );
}

/// Spawn the backend worker thread that performs blocking HTTP requests.
///
/// Commands are handled one at a time in arrival order, so cache reads and
/// invalidations never interleave. Replies arrive as [`CoreEvent`] values that
/// the UI polls each frame.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(api: ApiClient) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("qreview-gui-backend".to_string())
        .spawn(move || {
            let mut state = WorkerState {
                api,
                evt_tx,
                details: DetailCache::default(),
                page_images: PageImagesCache::default(),
                perf_log_enabled: env_flag_enabled("QREVIEW_BACKEND_PERF_LOG"),
            };
            for cmd in cmd_rx.iter() {
                dispatch(&mut state, cmd);
            }
        })
        .expect("spawn backend worker");

    BackendHandle { cmd_tx, evt_rx }
}

fn dispatch(state: &mut WorkerState, cmd: CoreCmd) {
    match cmd {
        CoreCmd::LoadQuestions { scope } => questions::handle_load_questions(state, scope),
        CoreCmd::LoadDetail { id, scope } => questions::handle_load_detail(state, id, scope),
        CoreCmd::OpenBrowser { id, scope } => questions::handle_open_browser(state, id, scope),
        CoreCmd::SaveEdits {
            id,
            update,
            mark_corrected,
        } => mutations::handle_save_edits(state, id, update, mark_corrected),
        CoreCmd::MarkStatus { id, mutation } => {
            mutations::handle_mark_status(state, id, mutation)
        }
        CoreCmd::UploadImage { id, path } => mutations::handle_upload_image(state, id, path),
        CoreCmd::AssignImage { id, image_url } => {
            mutations::handle_assign_image(state, id, image_url)
        }
        CoreCmd::RemoveImage { id } => mutations::handle_remove_image(state, id),
        CoreCmd::GenerateExplanation { id, request } => {
            mutations::handle_generate_explanation(state, id, request)
        }
        CoreCmd::LoadAvailablePages { file } => images::handle_available_pages(state, file),
        CoreCmd::LoadPageImages { location } => images::handle_page_images(state, location),
    }
}
