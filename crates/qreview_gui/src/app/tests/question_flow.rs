//! Filtering, navigation, and status-mark advancement.

use super::*;
use qreview_core::filter::FilterState;
use qreview_core::models::{QuestionStatus, StatusMutation};

fn mixed_page() -> QuestionsPage {
    let questions = (1..=10)
        .map(|id| {
            let status = if id % 3 == 0 { "needs_review" } else { "verified" };
            summary(id, status, "Cardiology", &format!("Question {}", id))
        })
        .collect();
    page(questions)
}

#[test]
fn status_filter_narrows_selector_to_matching_questions() {
    let mut harness = make_app();
    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: None,
        page: mixed_page(),
    });
    assert_eq!(harness.app.dashboard.selector().len(), 10);
    harness.drain();

    harness.app.update_filters(FilterState {
        status: Some("needs_review".to_string()),
        ..Default::default()
    });

    assert_eq!(harness.app.dashboard.selector_ids(), vec![3, 6, 9]);
    assert!(harness
        .app
        .dashboard
        .selector()
        .iter()
        .all(|entry| entry.label.starts_with("✅ #")));
    assert_eq!(harness.app.dashboard.selected(), Some(3));
    assert_eq!(detail_requests(&harness.drain()), vec![3]);
    assert_eq!(
        harness.app.store.load_filters().status.as_deref(),
        Some("needs_review")
    );
}

#[test]
fn file_filter_change_refetches_scope_and_drops_stale_list() {
    let mut harness = loaded_app(3);

    harness.app.update_filters(FilterState {
        file_path: Some("exam.pdf".to_string()),
        ..Default::default()
    });
    let commands = harness.drain();
    assert!(commands.iter().any(|command| matches!(
        command,
        CoreCmd::LoadQuestions { scope: Some(file) } if file == "exam.pdf"
    )));
    assert!(harness.app.questions_loading);

    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: None,
        page: page(vec![summary(50, "verified", "Renal", "Old scope")]),
    });
    assert_eq!(harness.app.dashboard.questions().len(), 3);

    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: Some("exam.pdf".to_string()),
        page: page(vec![summary(7, "verified", "Renal", "In file")]),
    });
    assert_eq!(harness.app.dashboard.selector_ids(), vec![7]);
    assert!(!harness.app.questions_loading);
}

#[test]
fn navigation_moves_between_neighbors_and_stops_at_ends() {
    let mut harness = loaded_app(3);

    harness.app.navigate(NavDirection::Prev);
    assert!(harness.drain().is_empty());

    harness.app.navigate(NavDirection::Next);
    assert_eq!(harness.app.dashboard.selected(), Some(2));
    assert_eq!(detail_requests(&harness.drain()), vec![2]);

    let position = harness.app.nav_position().expect("position");
    assert_eq!(position.count_label(), "2 / 3");
    assert_eq!(position.prev, Some(1));
    assert_eq!(position.next, Some(3));
}

#[test]
fn selector_click_keeps_detail_scroll_offset() {
    let mut harness = loaded_app(3);
    harness.app.scroll_to_top = false;

    harness.app.select_question(3);

    assert_eq!(harness.app.dashboard.selected(), Some(3));
    assert!(!harness.app.scroll_to_top);
    assert_eq!(detail_requests(&harness.drain()), vec![3]);
}

#[test]
fn marking_status_advances_to_next_question() {
    let mut harness = loaded_app(3);

    harness.app.mark_status(StatusMutation::Incorrect);
    assert!(harness.app.mutation_in_flight);
    assert!(harness.drain().iter().any(|command| matches!(
        command,
        CoreCmd::MarkStatus {
            id: 1,
            mutation: StatusMutation::Incorrect
        }
    )));

    harness.app.apply_event(CoreEvent::StatusMarked {
        id: 1,
        mutation: StatusMutation::Incorrect,
    });

    assert!(!harness.app.mutation_in_flight);
    assert_eq!(harness.app.dashboard.selected(), Some(2));
    assert_eq!(detail_requests(&harness.drain()), vec![2]);
    assert_eq!(
        harness.app.dashboard.questions()[0].status,
        QuestionStatus::Incorrect
    );
    assert_eq!(
        harness.app.status.as_ref().map(|status| status.text.as_str()),
        Some("Question 1 marked as incorrect.")
    );
}

#[test]
fn marking_out_of_filtered_view_selects_following_question() {
    let mut harness = loaded_app(3);
    harness.app.update_filters(FilterState {
        status: Some("needs_review".to_string()),
        ..Default::default()
    });
    harness.drain();

    harness.app.apply_event(CoreEvent::StatusMarked {
        id: 1,
        mutation: StatusMutation::Corrected,
    });

    assert_eq!(harness.app.dashboard.selector_ids(), vec![2, 3]);
    assert_eq!(harness.app.dashboard.selected(), Some(2));
}

#[test]
fn marking_last_filtered_question_clears_detail() {
    let mut harness = loaded_app(1);
    harness.app.update_filters(FilterState {
        status: Some("needs_review".to_string()),
        ..Default::default()
    });
    harness.drain();

    harness.app.apply_event(CoreEvent::StatusMarked {
        id: 1,
        mutation: StatusMutation::Corrected,
    });

    assert!(harness.app.dashboard.selector().is_empty());
    assert!(harness.app.detail_view.is_none());
    assert!(detail_requests(&harness.drain()).is_empty());
}
