//! Loading, selection, feedback, and error-surface behavior.

use super::*;
use crate::backend::CoreErrorSource;
use qreview_core::filter::FilterState;

#[test]
fn loaded_questions_populate_selector_and_request_first_detail() {
    let mut harness = make_app();
    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: None,
        page: page(vec![
            summary(4, "verified", "Cardiology", "First"),
            summary(9, "needs_review", "Renal", "Second"),
        ]),
    });

    assert_eq!(harness.app.dashboard.selector_ids(), vec![4, 9]);
    assert_eq!(harness.app.dashboard.selected(), Some(4));
    assert!(harness.app.detail_loading);
    assert_eq!(detail_requests(&harness.drain()), vec![4]);
}

#[test]
fn empty_filter_result_shows_placeholder_without_detail_request() {
    let mut harness = make_app();
    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: None,
        page: page(vec![summary(1, "incorrect", "Cardiology", "Only")]),
    });
    harness.drain();

    harness.app.update_filters(FilterState {
        search: "no such text".to_string(),
        ..Default::default()
    });

    assert!(harness.app.dashboard.selector().is_empty());
    assert!(harness.app.dashboard.selected().is_none());
    assert!(harness.app.detail_view.is_none());
    assert!(detail_requests(&harness.drain()).is_empty());
}

#[test]
fn detail_for_unselected_question_is_dropped() {
    let mut harness = loaded_app(3);
    harness.app.select_question(2);
    harness.app.apply_event(CoreEvent::DetailLoaded {
        id: 1,
        scope: None,
        detail: detail(1, "needs_review"),
    });

    assert!(harness.app.detail.is_none());
    assert!(harness.app.detail_loading);

    harness.app.apply_event(CoreEvent::DetailLoaded {
        id: 2,
        scope: None,
        detail: detail(2, "needs_review"),
    });
    assert_eq!(harness.app.detail.as_ref().map(|d| d.id), Some(2));
    assert_eq!(
        harness.app.detail_view.as_ref().map(|v| v.title.as_str()),
        Some("Question 2")
    );
}

#[test]
fn detail_error_renders_inline_only_for_selected_question() {
    let mut harness = loaded_app(3);
    harness.app.apply_event(CoreEvent::Error {
        source: CoreErrorSource::Detail(3),
        message: "Error loading details: boom".to_string(),
    });
    assert!(harness.app.detail_error.is_none());

    harness.app.apply_event(CoreEvent::Error {
        source: CoreErrorSource::Detail(1),
        message: "Error loading details: boom".to_string(),
    });
    assert_eq!(
        harness.app.detail_error.as_deref(),
        Some("Error loading details: boom")
    );
    assert!(harness.app.dialog.is_none());
}

#[test]
fn list_error_keeps_previous_questions() {
    let mut harness = loaded_app(2);
    harness.app.apply_event(CoreEvent::Error {
        source: CoreErrorSource::Questions,
        message: "Error loading questions: offline".to_string(),
    });

    assert_eq!(
        harness.app.list_error.as_deref(),
        Some("Error loading questions: offline")
    );
    assert_eq!(harness.app.dashboard.questions().len(), 2);
}

#[test]
fn mutation_error_opens_alert() {
    let mut harness = loaded_app(2);
    harness.app.mutation_in_flight = true;
    harness.app.apply_event(CoreEvent::Error {
        source: CoreErrorSource::Image(1),
        message: "Error removing image: denied".to_string(),
    });

    assert!(!harness.app.mutation_in_flight);
    assert_eq!(
        harness.app.dialog,
        Some(Dialog::Alert {
            message: "Error removing image: denied".to_string()
        })
    );
}

#[test]
fn set_status_pushes_toast_feedback() {
    let mut harness = make_app();
    harness.app.set_status("Changes saved successfully.");

    assert!(harness.app.status.is_some());
    assert_eq!(
        harness.app.toasts.back().map(|toast| toast.text.as_str()),
        Some("Changes saved successfully.")
    );
}

#[test]
fn toast_queue_dedupes_tail_and_caps_length() {
    let mut harness = make_app();

    harness.app.set_status("Repeated");
    harness.app.set_status("Repeated");
    assert_eq!(harness.app.toasts.len(), 1);

    for idx in 0..(TOAST_LIMIT + 2) {
        harness.app.set_status(format!("Toast {}", idx));
    }
    assert_eq!(harness.app.toasts.len(), TOAST_LIMIT);
}

#[test]
fn feedback_expires_after_its_ttl() {
    let mut harness = make_app();
    harness.app.set_status("Image removed.");

    harness.app.expire_feedback(Instant::now());
    assert!(harness.app.status.is_some());
    assert_eq!(harness.app.toasts.len(), 1);

    harness.app.expire_feedback(Instant::now() + STATUS_TTL + TOAST_TTL);
    assert!(harness.app.status.is_none());
    assert!(harness.app.toasts.is_empty());
}
