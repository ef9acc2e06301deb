//! Mutation handlers (edits, status, images, explanations) for the GUI backend worker.
//!
//! Every successful mutation evicts all cached detail scopes of the question
//! before the reply is sent, so the next detail read goes to the server.

use super::{send_error, WorkerState};
use crate::backend::{CoreErrorSource, CoreEvent, ImageChange};
use qreview_core::models::{ExplanationRequest, QuestionId, StatusMutation, UpdateQuestionRequest};
use std::path::PathBuf;
use tracing::{debug, error};

fn invalidate(state: &mut WorkerState, id: QuestionId) {
    let evicted = state.details.evict_question(id);
    debug!(question = id, evicted, "detail cache invalidated");
}

pub(super) fn handle_save_edits(
    state: &mut WorkerState,
    id: QuestionId,
    update: UpdateQuestionRequest,
    mark_corrected: bool,
) {
    if let Err(err) = state.api.update_question(id, &update) {
        error!("backend save question {} failed: {}", id, err);
        send_error(
            &state.evt_tx,
            CoreErrorSource::Save(id),
            format!("Error saving changes: {}", err.user_message()),
        );
        return;
    }
    invalidate(state, id);

    let mut marked_corrected = false;
    if mark_corrected {
        match state.api.mark_status(id, StatusMutation::Corrected) {
            Ok(_) => {
                invalidate(state, id);
                marked_corrected = true;
            }
            Err(err) => {
                error!("backend mark corrected {} failed: {}", id, err);
                send_error(
                    &state.evt_tx,
                    CoreErrorSource::Status(id),
                    format!("Error marking question as corrected: {}", err.user_message()),
                );
            }
        }
    }
    state.emit(CoreEvent::EditsSaved {
        id,
        update,
        marked_corrected,
    });
}

pub(super) fn handle_mark_status(
    state: &mut WorkerState,
    id: QuestionId,
    mutation: StatusMutation,
) {
    match state.api.mark_status(id, mutation) {
        Ok(_) => {
            invalidate(state, id);
            state.emit(CoreEvent::StatusMarked { id, mutation });
        }
        Err(err) => {
            error!("backend mark {} as {} failed: {}", id, mutation.target(), err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Status(id),
                format!(
                    "Error marking question as {}: {}",
                    mutation.target().label(),
                    err.user_message()
                ),
            );
        }
    }
}

pub(super) fn handle_upload_image(state: &mut WorkerState, id: QuestionId, path: PathBuf) {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("reading {} for upload failed: {}", path.display(), err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Image(id),
                format!("Error uploading image: {}", err),
            );
            return;
        }
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    match state.api.upload_image(id, &file_name, bytes) {
        Ok(ack) => {
            invalidate(state, id);
            state.emit(CoreEvent::ImageChanged {
                id,
                image_url: ack.image_url,
                change: ImageChange::Uploaded,
            });
        }
        Err(err) => {
            error!("backend upload image {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Image(id),
                format!("Error uploading image: {}", err.user_message()),
            );
        }
    }
}

pub(super) fn handle_assign_image(state: &mut WorkerState, id: QuestionId, image_url: String) {
    match state.api.assign_image(id, &image_url) {
        Ok(ack) => {
            invalidate(state, id);
            state.emit(CoreEvent::ImageChanged {
                id,
                image_url: Some(ack.image_url.unwrap_or(image_url)),
                change: ImageChange::Assigned,
            });
        }
        Err(err) => {
            error!("backend assign image {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Image(id),
                format!("Error selecting image: {}", err.user_message()),
            );
        }
    }
}

pub(super) fn handle_remove_image(state: &mut WorkerState, id: QuestionId) {
    match state.api.remove_image(id) {
        Ok(_) => {
            invalidate(state, id);
            state.emit(CoreEvent::ImageChanged {
                id,
                image_url: None,
                change: ImageChange::Removed,
            });
        }
        Err(err) => {
            error!("backend remove image {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Image(id),
                format!("Error removing image: {}", err.user_message()),
            );
        }
    }
}

pub(super) fn handle_generate_explanation(
    state: &mut WorkerState,
    id: QuestionId,
    request: ExplanationRequest,
) {
    match state.api.generate_explanation(&request) {
        Ok(explanation) => state.emit(CoreEvent::ExplanationGenerated { id, explanation }),
        Err(err) => {
            error!("backend generate explanation {} failed: {}", id, err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::Explanation(id),
                format!("Error generating explanation: {}", err.user_message()),
            );
        }
    }
}
