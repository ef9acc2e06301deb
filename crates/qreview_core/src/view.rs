//! Render-ready view of a question detail.
//!
//! [`DetailView`] is what the GUI detail panel draws and what the CLI prints
//! (plain text or escaped HTML).

use crate::consensus::Consensus;
use crate::constants::PREDICTION_ERROR_PREVIEW_CHARS;
use crate::models::{Prediction, QuestionDetail, QuestionId, QuestionStatus, StatusMutation};
use crate::text::{char_prefix, escape_html, file_name};
use std::fmt::Write as _;

pub const NO_EXPLANATION_TEXT: &str = "No explanation provided.";
pub const REQUIRES_IMAGE_TEXT: &str = "This question requires an image";
pub const NO_IMAGE_REQUIRED_TEXT: &str = "This question does not require an image";
pub const UNKNOWN_CHOICE_TEXT: &str = "[unknown]";

/// Which branch a prediction line was rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionKind {
    Error,
    Match,
    Wrong,
    NoneCorrect,
    NoClearSelection,
    Invalid,
}

impl PredictionKind {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Match => "✅",
            Self::NoneCorrect | Self::NoClearSelection => "❓",
            Self::Error | Self::Wrong | Self::Invalid => "❌",
        }
    }
}

/// One model's line in the predictions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionLine {
    pub kind: PredictionKind,
    pub model: String,
    /// Choice text the model picked, emphasized when drawn.
    pub selected: Option<String>,
    /// Text following the model name (and the emphasized choice, if any).
    pub note: String,
}

impl PredictionLine {
    pub fn from_prediction(prediction: &Prediction, detail: &QuestionDetail) -> Self {
        let expected = prediction
            .expected_index
            .and_then(|index| detail.choice_at(index))
            .unwrap_or(UNKNOWN_CHOICE_TEXT);
        let selected_choice = prediction
            .selected_index
            .and_then(|index| detail.choice_at(index));
        let suggested = prediction
            .suggested_answer
            .as_deref()
            .filter(|answer| !answer.is_empty());
        let model = prediction.model_name.clone();

        if let Some(error) = prediction.error.as_deref().filter(|e| !e.is_empty()) {
            return Self {
                kind: PredictionKind::Error,
                model,
                selected: None,
                note: format!(
                    "Error - {}...",
                    char_prefix(error, PREDICTION_ERROR_PREVIEW_CHARS)
                ),
            };
        }
        if prediction.matches_expected {
            return Self {
                kind: PredictionKind::Match,
                model,
                selected: Some(selected_choice.unwrap_or(UNKNOWN_CHOICE_TEXT).to_string()),
                note: String::new(),
            };
        }
        if let Some(choice) = selected_choice {
            return Self {
                kind: PredictionKind::Wrong,
                model,
                selected: Some(choice.to_string()),
                note: format!(" (Expected: {})", expected),
            };
        }
        let (kind, note) = match prediction.selected_index {
            Some(-1) => (
                PredictionKind::NoneCorrect,
                match suggested {
                    Some(answer) => format!(
                        "None correct - Suggested: {} (Expected: {})",
                        answer, expected
                    ),
                    None => format!("None correct (Expected: {})", expected),
                },
            ),
            Some(-2) => (
                PredictionKind::NoClearSelection,
                match suggested {
                    Some(answer) => format!(
                        "No clear selection: \"{}\" (Expected: {})",
                        answer, expected
                    ),
                    None => format!("No clear selection (Expected: {})", expected),
                },
            ),
            _ => (
                PredictionKind::Invalid,
                format!("Invalid selection (Expected: {})", expected),
            ),
        };
        Self {
            kind,
            model,
            selected: None,
            note,
        }
    }

    /// Full line as shown in text output.
    pub fn text(&self) -> String {
        format!(
            "{} {}: {}{}",
            self.kind.glyph(),
            self.model,
            self.selected.as_deref().unwrap_or(""),
            self.note
        )
    }

    fn html(&self) -> String {
        let selected = self
            .selected
            .as_deref()
            .map(|choice| format!("<span class=\"selected-choice\">{}</span>", escape_html(choice)))
            .unwrap_or_default();
        format!(
            "<p class=\"prediction\">{} {}: {}{}</p>",
            self.kind.glyph(),
            escape_html(&self.model),
            selected,
            escape_html(&self.note)
        )
    }
}

/// Image area of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSection {
    /// Image attached: view, browse, or remove.
    Attached { url: String },
    /// No image: offer the browser to select one.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub text: String,
    pub correct: bool,
}

/// Source-document metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMeta {
    pub file_path: String,
    pub file_name: String,
    pub page: Option<i64>,
    pub question_number: Option<i64>,
}

/// Everything the detail renderer draws for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: QuestionId,
    pub title: String,
    pub status: QuestionStatus,
    pub status_color: &'static str,
    pub category: String,
    pub category_color: &'static str,
    pub source: Option<SourceMeta>,
    pub actions: Vec<StatusMutation>,
    pub text: String,
    pub requires_image: bool,
    pub image: ImageSection,
    pub choices: Vec<ChoiceView>,
    pub explanation: String,
    pub predictions: Vec<PredictionLine>,
    pub consensus: Consensus,
}

impl DetailView {
    /// Build the view; `category_color` comes from the dashboard's palette map.
    pub fn build(detail: &QuestionDetail, category_color: &'static str) -> Self {
        let correct = detail.correct_index();
        let source = detail.file_path.as_deref().map(|path| SourceMeta {
            file_path: path.to_string(),
            file_name: file_name(path).to_string(),
            page: detail.page,
            question_number: detail.question_number,
        });
        let explanation = detail
            .explanation
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_EXPLANATION_TEXT)
            .to_string();
        let image = match detail.image_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => ImageSection::Attached {
                url: url.to_string(),
            },
            None => ImageSection::Missing,
        };
        Self {
            id: detail.id,
            title: format!("Question {}", detail.id),
            status: detail.status.clone(),
            status_color: detail.status.color_hex(),
            category: detail.category.clone(),
            category_color,
            source,
            actions: StatusMutation::available_from(&detail.status),
            text: detail.enhanced_text.clone(),
            requires_image: detail.requires_image,
            image,
            choices: detail
                .choices
                .iter()
                .enumerate()
                .map(|(index, text)| ChoiceView {
                    text: text.clone(),
                    correct: Some(index) == correct,
                })
                .collect(),
            explanation,
            predictions: detail
                .verification_results
                .iter()
                .map(|prediction| PredictionLine::from_prediction(prediction, detail))
                .collect(),
            consensus: Consensus::classify(detail.agreement(), detail.models_count),
        }
    }

    pub fn requirement_text(&self) -> &'static str {
        if self.requires_image {
            REQUIRES_IMAGE_TEXT
        } else {
            NO_IMAGE_REQUIRED_TEXT
        }
    }

    /// `Consensus: <label> <glyph>` line.
    pub fn consensus_text(&self) -> String {
        format!("{} {}", self.consensus.label(), self.consensus.glyph())
    }

    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = write!(out, "Status: {} | Category: {}", self.status, self.category);
        if let Some(source) = &self.source {
            let _ = write!(out, " | File: {}", source.file_name);
            if let Some(page) = source.page {
                let _ = write!(out, " | Page: {}", page);
            }
            if let Some(number) = source.question_number {
                let _ = write!(out, " | Original Question: {}", number);
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.text);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.requirement_text());
        if let ImageSection::Attached { url } = &self.image {
            let _ = writeln!(out, "Image: {}", url);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Choices:");
        for choice in &self.choices {
            let marker = if choice.correct { "✓" } else { "-" };
            let _ = writeln!(out, "  {} {}", marker, choice.text);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Explanation:");
        let _ = writeln!(out, "  {}", self.explanation);
        let _ = writeln!(out);
        let _ = writeln!(out, "Model Predictions:");
        for line in &self.predictions {
            let _ = writeln!(out, "  {}", line.text());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Consensus: {}", self.consensus_text());
        out
    }

    /// Escaped HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(html, "<h2>{}</h2>", escape_html(&self.title));
        let _ = write!(
            html,
            concat!(
                "<p><strong>Status:</strong> <span style=\"color: {}\">{}</span>",
                " | <strong>Category:</strong> <span style=\"color: {}\">{}</span>",
            ),
            self.status_color,
            escape_html(self.status.as_str()),
            self.category_color,
            escape_html(&self.category)
        );
        if let Some(source) = &self.source {
            let _ = write!(
                html,
                " | <strong>File:</strong> <span title=\"{}\" class=\"file-path\">{}</span>",
                escape_html(&source.file_path),
                escape_html(&source.file_name)
            );
            if let Some(page) = source.page {
                let _ = write!(html, " | <strong>Page:</strong> {}", page);
            }
            if let Some(number) = source.question_number {
                let _ = write!(html, " | <strong>Original Question:</strong> {}", number);
            }
        }
        html.push_str("</p>");
        let _ = write!(html, "<p>{}</p>", escape_html(&self.text));

        let requirement_class = if self.requires_image {
            "required"
        } else {
            "not-required"
        };
        let _ = write!(
            html,
            "<div class=\"image-section\"><div class=\"image-requirement {}\">{}</div>",
            requirement_class,
            self.requirement_text()
        );
        if let ImageSection::Attached { url } = &self.image {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"Question Image\" class=\"question-image\"/>",
                escape_html(url)
            );
        }
        html.push_str("</div>");

        html.push_str("<div class=\"section-title\">Choices:</div><ul>");
        for choice in &self.choices {
            if choice.correct {
                let _ = write!(
                    html,
                    "<li class=\"correct\">✓ {}</li>",
                    escape_html(&choice.text)
                );
            } else {
                let _ = write!(html, "<li>{}</li>", escape_html(&choice.text));
            }
        }
        html.push_str("</ul>");

        let _ = write!(
            html,
            concat!(
                "<div class=\"section-title\">Explanation:</div>",
                "<div class=\"section-content\">{}</div>",
            ),
            escape_html(&self.explanation)
        );
        html.push_str("<div class=\"section-title\">Model Predictions:</div>");
        html.push_str("<div class=\"section-content\">");
        for line in &self.predictions {
            html.push_str(&line.html());
        }
        html.push_str("</div>");
        let _ = write!(
            html,
            "<div class=\"section-title\">Consensus:</div><p class=\"{}\">{}</p>",
            self.consensus.css_class(),
            escape_html(&self.consensus_text())
        );
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(predictions: serde_json::Value) -> QuestionDetail {
        serde_json::from_value(json!({
            "id": 42,
            "enhanced_text": "Which is <b>largest</b>?",
            "category": "astronomy",
            "status": "likely_correct",
            "explanation": "",
            "requires_image": true,
            "image_url": "/static/q42.png",
            "choices": ["Mars", "Jupiter", "Venus"],
            "is_correct": ["false", "true", "false"],
            "verification_results": predictions,
            "models_count": 4,
            "file_path": "exams/2020/astro.pdf",
            "page": 3,
            "question_number": 7,
        }))
        .expect("decode detail")
    }

    fn prediction(value: serde_json::Value) -> Prediction {
        serde_json::from_value(value).expect("decode prediction")
    }

    #[test]
    fn prediction_branches_render_expected_text() {
        let question = detail(json!([]));
        let line = |value| PredictionLine::from_prediction(&prediction(value), &question).text();

        assert_eq!(
            line(json!({"model_name": "m", "error": "x".repeat(80)})),
            format!("❌ m: Error - {}...", "x".repeat(50))
        );
        assert_eq!(
            line(json!({
                "model_name": "m",
                "selected_index": 1,
                "expected_index": 1,
                "matches_expected": true
            })),
            "✅ m: Jupiter"
        );
        assert_eq!(
            line(json!({"model_name": "m", "selected_index": 0, "expected_index": 1})),
            "❌ m: Mars (Expected: Jupiter)"
        );
        assert_eq!(
            line(json!({
                "model_name": "m",
                "selected_index": -1,
                "expected_index": 1,
                "suggested_answer": "Saturn"
            })),
            "❓ m: None correct - Suggested: Saturn (Expected: Jupiter)"
        );
        assert_eq!(
            line(json!({
                "model_name": "m",
                "selected_index": -2,
                "expected_index": 1,
                "suggested_answer": "Saturn"
            })),
            "❓ m: No clear selection: \"Saturn\" (Expected: Jupiter)"
        );
        assert_eq!(
            line(json!({"model_name": "m", "selected_index": -2, "expected_index": 9})),
            "❓ m: No clear selection (Expected: [unknown])"
        );
        assert_eq!(
            line(json!({"model_name": "m", "selected_index": 7, "expected_index": 1})),
            "❌ m: Invalid selection (Expected: Jupiter)"
        );
        assert_eq!(
            line(json!({"model_name": "m", "expected_index": 1})),
            "❌ m: Invalid selection (Expected: Jupiter)"
        );
    }

    #[test]
    fn build_collects_badges_actions_and_consensus() {
        let question = detail(json!([
            {"model_name": "a", "selected_index": 1, "expected_index": 1, "matches_expected": true},
            {"model_name": "b", "selected_index": 1, "expected_index": 1, "matches_expected": true},
            {"model_name": "c", "selected_index": 1, "expected_index": 1, "matches_expected": true},
            {"model_name": "d", "selected_index": 0, "expected_index": 1},
        ]));
        let view = DetailView::build(&question, "#4c6fff");
        assert_eq!(view.title, "Question 42");
        assert_eq!(view.status_color, "#f1c40f");
        assert_eq!(view.actions.len(), 3);
        assert_eq!(view.explanation, NO_EXPLANATION_TEXT);
        assert!(view.choices[1].correct);
        assert!(!view.choices[0].correct);
        assert_eq!(view.consensus.label(), "Majority Agreement (3/4)");
        assert_eq!(
            view.source.as_ref().map(|s| s.file_name.as_str()),
            Some("astro.pdf")
        );
        assert_eq!(
            view.image,
            ImageSection::Attached {
                url: "/static/q42.png".to_string()
            }
        );
    }

    #[test]
    fn broken_answer_key_highlights_nothing() {
        let mut question = detail(json!([]));
        question.is_correct = vec!["false".to_string(); 3];
        let view = DetailView::build(&question, "#4c6fff");
        assert!(view.choices.iter().all(|choice| !choice.correct));
    }

    #[test]
    fn html_export_escapes_content() {
        let question = detail(json!([
            {
                "model_name": "<script>",
                "selected_index": 1,
                "expected_index": 1,
                "matches_expected": true
            },
        ]));
        let html = DetailView::build(&question, "#4c6fff").to_html();
        assert!(html.contains("Which is &lt;b&gt;largest&lt;/b&gt;?"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("class=\"minority-agreement\""));
        assert!(html.contains("<li class=\"correct\">✓ Jupiter</li>"));
    }

    #[test]
    fn text_export_lists_sections() {
        let view = DetailView::build(&detail(json!([])), "#4c6fff");
        let text = view.to_text();
        assert!(text.starts_with("Question 42\n"));
        assert!(text.contains("File: astro.pdf | Page: 3 | Original Question: 7"));
        assert!(text.contains("  ✓ Jupiter"));
        assert!(text.contains(REQUIRES_IMAGE_TEXT));
        assert!(text.contains("Consensus: No Agreement ❌"));
    }
}
