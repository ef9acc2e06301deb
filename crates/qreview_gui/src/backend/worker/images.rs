//! Image-browser page handlers for the GUI backend worker.

use super::{log_cache_perf, WorkerState};
use crate::backend::CoreEvent;
use qreview_core::browser::BrowserLocation;
use std::time::Instant;
use tracing::{error, warn};

pub(super) fn handle_available_pages(state: &mut WorkerState, file: String) {
    let pages = match state.api.available_pages(&file) {
        Ok(available) => available.pages,
        Err(err) => {
            warn!("available pages for {} failed: {}", file, err);
            Vec::new()
        }
    };
    state.emit(CoreEvent::AvailablePagesLoaded { file, pages });
}

pub(super) fn handle_page_images(state: &mut WorkerState, location: BrowserLocation) {
    let started = Instant::now();
    let key = (
        location.file.clone(),
        location.page,
        location.question_number,
    );
    if let Some(images) = state.page_images.get(&key) {
        log_cache_perf(
            state,
            "page_images",
            true,
            started.elapsed().as_secs_f64() * 1000.0,
        );
        state.emit(CoreEvent::PageImagesLoaded {
            location,
            result: Ok(images),
        });
        return;
    }

    let result = state
        .api
        .page_images(&location.file, location.page, location.question_number);
    let result = match result {
        Ok(images) => {
            state.page_images.insert(key, images.clone());
            log_cache_perf(
                state,
                "page_images",
                false,
                started.elapsed().as_secs_f64() * 1000.0,
            );
            Ok(images)
        }
        Err(err) => {
            error!(
                "backend page images {} p{} failed: {}",
                location.file, location.page, err
            );
            Err(format!("Error loading images: {}", err.user_message()))
        }
    };
    state.emit(CoreEvent::PageImagesLoaded { location, result });
}
