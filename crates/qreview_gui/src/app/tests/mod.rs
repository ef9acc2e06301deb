//! App-state tests that drive `apply_event` and user actions without a window.

use super::*;
use crate::backend::{BackendHandle, CoreCmd, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use qreview_core::models::{QuestionDetail, QuestionSummary, QuestionsPage};
use serde_json::json;

mod question_flow;
mod state_basics;

struct TestHarness {
    app: QReviewApp,
    cmd_rx: Receiver<CoreCmd>,
    _evt_tx: Sender<CoreEvent>,
}

impl TestHarness {
    /// Commands sent since the last drain.
    fn drain(&self) -> Vec<CoreCmd> {
        self.cmd_rx.try_iter().collect()
    }
}

fn make_app() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let app = QReviewApp::with_parts(
        BackendHandle::from_test_channels(cmd_tx, evt_rx),
        FilterStore::in_memory(),
        "http://review.test".to_string(),
    );
    TestHarness {
        app,
        cmd_rx,
        _evt_tx: evt_tx,
    }
}

fn summary(id: i64, status: &str, category: &str, text: &str) -> QuestionSummary {
    serde_json::from_value(json!({
        "id": id,
        "status": status,
        "category": category,
        "enhanced_text": text,
        "representative_file_path": "/data/exams/cardio.pdf",
        "models_count": 4,
        "matching_models": 4
    }))
    .expect("decode summary")
}

fn detail(id: i64, status: &str) -> QuestionDetail {
    serde_json::from_value(json!({
        "id": id,
        "enhanced_text": format!("Question text {}", id),
        "category": "Cardiology",
        "status": status,
        "explanation": "Because.",
        "choices": ["Alpha", "Beta", "Gamma"],
        "is_correct": ["false", "true", "false"],
        "models_count": 2,
        "verification_results": [
            {"model_name": "m1", "selected_index": 1, "expected_index": 1,
             "matches_expected": true},
            {"model_name": "m2", "selected_index": 0, "expected_index": 1,
             "matches_expected": false}
        ],
        "representative_file_path": "exam.pdf",
        "representative_page": 4,
        "representative_question_number": 12,
        "file_locations": [
            {"file_path": "exam.pdf", "page": 4, "question_number": 12},
            {"file_path": "retake.pdf", "page": 9, "question_number": 3}
        ]
    }))
    .expect("decode detail")
}

fn page(questions: Vec<QuestionSummary>) -> QuestionsPage {
    QuestionsPage {
        questions,
        available_files: vec!["exam.pdf".to_string(), "retake.pdf".to_string()],
    }
}

/// Harness with questions 1..=n loaded (all `needs_review`) and question 1's
/// detail displayed.
fn loaded_app(count: i64) -> TestHarness {
    let mut harness = make_app();
    let questions = (1..=count)
        .map(|id| summary(id, "needs_review", "Cardiology", &format!("Question {}", id)))
        .collect();
    harness.app.apply_event(CoreEvent::QuestionsLoaded {
        scope: None,
        page: page(questions),
    });
    harness.app.apply_event(CoreEvent::DetailLoaded {
        id: 1,
        scope: None,
        detail: detail(1, "needs_review"),
    });
    harness.drain();
    harness
}

fn detail_requests(commands: &[CoreCmd]) -> Vec<i64> {
    commands
        .iter()
        .filter_map(|command| match command {
            CoreCmd::LoadDetail { id, .. } => Some(*id),
            _ => None,
        })
        .collect()
}
