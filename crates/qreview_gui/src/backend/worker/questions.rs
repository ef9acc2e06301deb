//! Question list and detail handlers for the GUI backend worker.

use super::{log_cache_perf, send_error, WorkerState};
use crate::backend::{CoreErrorSource, CoreEvent};
use qreview_core::models::{QuestionDetail, QuestionId};
use qreview_core::AppError;
use std::time::Instant;
use tracing::{error, warn};

pub(super) fn handle_load_questions(state: &mut WorkerState, scope: Option<String>) {
    match state.api.list_questions(scope.as_deref()) {
        Ok(page) => state.emit(CoreEvent::QuestionsLoaded { scope, page }),
        Err(err) => {
            error!("backend list questions failed: {}", err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Questions,
                format!("Error loading questions: {}", err.user_message()),
            );
        }
    }
}

/// Cached detail for `(id, scope)`, fetching and filling the cache on a miss.
fn cached_detail(
    state: &mut WorkerState,
    id: QuestionId,
    scope: Option<String>,
) -> Result<QuestionDetail, AppError> {
    let started = Instant::now();
    let key = (id, scope);
    if let Some(detail) = state.details.get(&key) {
        log_cache_perf(
            state,
            "detail",
            true,
            started.elapsed().as_secs_f64() * 1000.0,
        );
        return Ok(detail);
    }
    let detail = state.api.get_question(id, key.1.as_deref())?;
    if let Err(err) = detail.check_answer_key() {
        warn!(question = id, "answer key inconsistent: {:?}", err);
    }
    state.details.insert(key, detail.clone());
    log_cache_perf(
        state,
        "detail",
        false,
        started.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(detail)
}

pub(super) fn handle_load_detail(state: &mut WorkerState, id: QuestionId, scope: Option<String>) {
    match cached_detail(state, id, scope.clone()) {
        Ok(detail) => state.emit(CoreEvent::DetailLoaded { id, scope, detail }),
        Err(err) => {
            error!("backend load detail {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Detail(id),
                format!("Error loading details: {}", err.user_message()),
            );
        }
    }
}

pub(super) fn handle_open_browser(state: &mut WorkerState, id: QuestionId, scope: Option<String>) {
    let detail = match cached_detail(state, id, scope) {
        Ok(detail) => detail,
        Err(err) => {
            error!("backend open image browser {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Browser(id),
                format!("Error loading image browser: {}", err.user_message()),
            );
            return;
        }
    };
    let image_files = match state.api.image_files() {
        Ok(files) => files.files,
        Err(err) => {
            warn!("image file list unavailable: {}", err);
            Vec::new()
        }
    };
    state.emit(CoreEvent::BrowserReady {
        id,
        detail,
        image_files,
    });
}
