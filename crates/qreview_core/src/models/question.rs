use super::lenient;
use super::status::QuestionStatus;
use serde::{Deserialize, Serialize};

/// Server-assigned question identifier.
pub type QuestionId = i64;

/// Separator used by the server when joining duplicate question texts.
pub const DUPLICATE_TEXT_SEPARATOR: &str = "||";

/// One row of `GET /api/questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub question_id: Option<i64>,
    #[serde(default)]
    pub enhanced_text: String,
    #[serde(default)]
    pub original_question_text: Option<String>,
    #[serde(default)]
    pub duplicate_question_texts: Option<String>,
    #[serde(default)]
    pub category: String,
    pub status: QuestionStatus,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub requires_image: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub array_order: Option<i64>,
    #[serde(default)]
    pub representative_file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub original_question_number: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub models_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub matching_models: u32,
}

impl QuestionSummary {
    /// Fraction of models that matched the answer key, `None` without models.
    pub fn match_ratio(&self) -> Option<f64> {
        (self.models_count > 0).then(|| self.matching_models as f64 / self.models_count as f64)
    }

    /// Non-empty duplicate texts split on `||`.
    pub fn duplicate_texts(&self) -> impl Iterator<Item = &str> {
        self.duplicate_question_texts
            .as_deref()
            .unwrap_or("")
            .split(DUPLICATE_TEXT_SEPARATOR)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Payload of `GET /api/questions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionsPage {
    #[serde(default)]
    pub questions: Vec<QuestionSummary>,
    #[serde(default)]
    pub available_files: Vec<String>,
}

/// One model's recorded answer for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub model_name: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub selected_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub expected_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub matches_expected: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggested_answer: Option<String>,
}

/// A source document location where a question (or one of its duplicates) appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLocation {
    pub file_path: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub question_number: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub array_order: Option<i64>,
    #[serde(default)]
    pub question_type: Option<String>,
}

/// Payload of `GET /api/question/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub id: QuestionId,
    #[serde(default)]
    pub enhanced_text: String,
    #[serde(default)]
    pub category: String,
    pub status: QuestionStatus,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub requires_image: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub original_question_id: Option<i64>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub is_correct: Vec<String>,
    #[serde(default)]
    pub verification_results: Vec<Prediction>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub models_count: u32,
    #[serde(default)]
    pub representative_file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub representative_page: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub representative_question_number: Option<i64>,
    #[serde(default)]
    pub file_locations: Vec<FileLocation>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub question_number: Option<i64>,
}

/// Ways a detail payload can violate the one-correct-answer rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKeyError {
    LengthMismatch { choices: usize, flags: usize },
    NoCorrectChoice,
    MultipleCorrectChoices(usize),
}

fn flag_is_true(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}

impl QuestionDetail {
    /// Index of the first choice flagged correct.
    pub fn correct_index(&self) -> Option<usize> {
        self.is_correct
            .iter()
            .take(self.choices.len())
            .position(|flag| flag_is_true(flag))
    }

    /// Whether choice `index` is flagged correct.
    pub fn is_choice_correct(&self, index: usize) -> bool {
        self.is_correct
            .get(index)
            .map(|flag| flag_is_true(flag))
            .unwrap_or(false)
    }

    /// Verify `choices`/`is_correct` agree and exactly one choice is correct.
    pub fn check_answer_key(&self) -> Result<usize, AnswerKeyError> {
        if self.choices.len() != self.is_correct.len() {
            return Err(AnswerKeyError::LengthMismatch {
                choices: self.choices.len(),
                flags: self.is_correct.len(),
            });
        }
        let correct: Vec<usize> = self
            .is_correct
            .iter()
            .enumerate()
            .filter(|(_, flag)| flag_is_true(flag))
            .map(|(index, _)| index)
            .collect();
        match correct.as_slice() {
            [] => Err(AnswerKeyError::NoCorrectChoice),
            [only] => Ok(*only),
            many => Err(AnswerKeyError::MultipleCorrectChoices(many.len())),
        }
    }

    /// Choice text at a (possibly negative or out-of-range) model index.
    pub fn choice_at(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.choices.get(index))
            .map(String::as_str)
    }

    /// Location entry for `file_path`, if the question appears in that file.
    pub fn location_for(&self, file_path: &str) -> Option<&FileLocation> {
        self.file_locations
            .iter()
            .find(|location| location.file_path == file_path)
    }

    /// Number of predictions that matched the answer key.
    pub fn agreement(&self) -> u32 {
        self.verification_results
            .iter()
            .filter(|prediction| prediction.matches_expected)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(choices: &[&str], flags: &[&str]) -> QuestionDetail {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "enhanced_text": "Which gas?",
            "category": "chemistry",
            "status": "needs_review",
            "choices": choices,
            "is_correct": flags,
        }))
        .expect("decode detail")
    }

    #[test]
    fn check_answer_key_accepts_single_correct_choice() {
        let question = detail(&["O2", "N2", "CO2"], &["false", "true", "false"]);
        assert_eq!(question.check_answer_key(), Ok(1));
        assert_eq!(question.correct_index(), Some(1));
        assert!(question.is_choice_correct(1));
        assert!(!question.is_choice_correct(5));
    }

    #[test]
    fn check_answer_key_reports_violations() {
        assert_eq!(
            detail(&["a", "b"], &["true"]).check_answer_key(),
            Err(AnswerKeyError::LengthMismatch {
                choices: 2,
                flags: 1
            })
        );
        assert_eq!(
            detail(&["a", "b"], &["false", "false"]).check_answer_key(),
            Err(AnswerKeyError::NoCorrectChoice)
        );
        assert_eq!(
            detail(&["a", "b"], &["true", "true"]).check_answer_key(),
            Err(AnswerKeyError::MultipleCorrectChoices(2))
        );
    }

    #[test]
    fn summary_decodes_pipeline_shapes() {
        let summary: QuestionSummary = serde_json::from_value(serde_json::json!({
            "id": 3,
            "enhanced_text": "Q",
            "category": "math",
            "status": "verified",
            "requires_image": 1,
            "array_order": 4.0,
            "models_count": 4,
            "matching_models": null,
            "duplicate_question_texts": "first || ||second"
        }))
        .expect("decode summary");
        assert!(summary.requires_image);
        assert_eq!(summary.array_order, Some(4));
        assert_eq!(summary.match_ratio(), Some(0.0));
        assert_eq!(
            summary.duplicate_texts().collect::<Vec<_>>(),
            vec!["first", "second"]
        );
    }

    #[test]
    fn choice_at_rejects_sentinel_indices() {
        let question = detail(&["a", "b"], &["true", "false"]);
        assert_eq!(question.choice_at(1), Some("b"));
        assert_eq!(question.choice_at(-1), None);
        assert_eq!(question.choice_at(2), None);
    }
}
