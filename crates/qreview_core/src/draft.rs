//! Edit-form draft: a working copy of a question with dirty tracking.

use crate::models::{
    ChoicePayload, ExplanationRequest, QuestionDetail, QuestionId, UpdateQuestionRequest,
};
use thiserror::Error;

/// Validation failures surfaced as blocking alerts by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please add at least one choice.")]
    NoChoices,
    #[error("Please select a correct choice.")]
    NoCorrectChoice,
    #[error("All choices must have text.")]
    EmptyChoice,
    #[error("Please select a correct choice before generating an explanation.")]
    NoCorrectChoiceForExplanation,
}

/// Editable fields of a question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftFields {
    pub enhanced_text: String,
    pub category: String,
    pub explanation: String,
    pub requires_image: bool,
    pub correct_index: Option<usize>,
    pub choices: Vec<String>,
}

impl DraftFields {
    fn from_detail(detail: &QuestionDetail) -> Self {
        Self {
            enhanced_text: detail.enhanced_text.clone(),
            category: detail.category.clone(),
            explanation: detail.explanation.clone().unwrap_or_default(),
            requires_image: detail.requires_image,
            correct_index: detail.correct_index(),
            choices: detail.choices.clone(),
        }
    }
}

/// Working copy of a question under edit, compared against the snapshot it
/// was opened from.
#[derive(Debug, Clone)]
pub struct EditDraft {
    question_id: QuestionId,
    original: DraftFields,
    current: DraftFields,
}

impl EditDraft {
    pub fn from_detail(detail: &QuestionDetail) -> Self {
        let fields = DraftFields::from_detail(detail);
        Self {
            question_id: detail.id,
            original: fields.clone(),
            current: fields,
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn fields(&self) -> &DraftFields {
        &self.current
    }

    /// Mutable access for form widgets; dirtiness is recomputed on read.
    pub fn fields_mut(&mut self) -> &mut DraftFields {
        &mut self.current
    }

    /// True when any tracked field differs from the opening snapshot.
    pub fn is_dirty(&self) -> bool {
        self.current != self.original
    }

    pub fn add_choice(&mut self) {
        self.current.choices.push(String::new());
    }

    /// Remove choice `index`, keeping indices contiguous.
    ///
    /// Removing the correct choice clears the selection; removing an earlier
    /// choice shifts the selection down by one.
    pub fn remove_choice(&mut self, index: usize) {
        if index >= self.current.choices.len() {
            return;
        }
        self.current.choices.remove(index);
        self.current.correct_index = match self.current.correct_index {
            Some(correct) if correct == index => None,
            Some(correct) if correct > index => Some(correct - 1),
            other => other,
        };
    }

    pub fn set_correct(&mut self, index: usize) {
        if index < self.current.choices.len() {
            self.current.correct_index = Some(index);
        }
    }

    /// Build the update payload, or the first validation failure.
    pub fn to_update_request(&self) -> Result<UpdateQuestionRequest, DraftError> {
        let fields = &self.current;
        if fields.choices.is_empty() {
            return Err(DraftError::NoChoices);
        }
        let correct = fields.correct_index.ok_or(DraftError::NoCorrectChoice)?;
        let choices: Vec<ChoicePayload> = fields
            .choices
            .iter()
            .enumerate()
            .map(|(index, text)| ChoicePayload {
                text: text.trim().to_string(),
                is_correct: index == correct,
            })
            .collect();
        if choices.iter().any(|choice| choice.text.is_empty()) {
            return Err(DraftError::EmptyChoice);
        }
        Ok(UpdateQuestionRequest {
            enhanced_text: fields.enhanced_text.clone(),
            category: fields.category.clone(),
            explanation: fields.explanation.clone(),
            requires_image: fields.requires_image,
            choices,
        })
    }

    /// Build the explanation-generation request; requires a correct choice.
    pub fn to_explanation_request(&self) -> Result<ExplanationRequest, DraftError> {
        let correct_index = self
            .current
            .correct_index
            .ok_or(DraftError::NoCorrectChoiceForExplanation)?;
        Ok(ExplanationRequest {
            question_text: self.current.enhanced_text.clone(),
            choices: self
                .current
                .choices
                .iter()
                .map(|choice| choice.trim().to_string())
                .collect(),
            correct_index,
        })
    }

    pub fn set_explanation(&mut self, explanation: String) {
        self.current.explanation = explanation;
    }

    /// Adopt the current values as the clean baseline after a successful save.
    pub fn mark_saved(&mut self) {
        self.original = self.current.clone();
    }
}
