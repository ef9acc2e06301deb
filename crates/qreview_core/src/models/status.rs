use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status assigned to a question.
///
/// Unrecognized strings survive a round-trip through [`QuestionStatus::Unknown`]
/// so newer server values are displayed verbatim instead of failing decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionStatus {
    Verified,
    LikelyCorrect,
    NeedsReview,
    Incorrect,
    Corrected,
    Unknown(String),
}

impl QuestionStatus {
    /// Wire value for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Verified => "verified",
            Self::LikelyCorrect => "likely_correct",
            Self::NeedsReview => "needs_review",
            Self::Incorrect => "incorrect",
            Self::Corrected => "corrected",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    /// Human-readable badge text (`needs_review` -> `needs review`).
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Badge color as `#rrggbb`.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Verified => "#2ecc71",
            Self::LikelyCorrect => "#f1c40f",
            Self::Incorrect => "#ff4757",
            Self::NeedsReview => "#fd7e14",
            Self::Corrected => "#1abc9c",
            Self::Unknown(_) => "#344767",
        }
    }
}

impl From<String> for QuestionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "verified" => Self::Verified,
            "likely_correct" => Self::LikelyCorrect,
            "needs_review" => Self::NeedsReview,
            "incorrect" => Self::Incorrect,
            "corrected" => Self::Corrected,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for QuestionStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<QuestionStatus> for String {
    fn from(status: QuestionStatus) -> Self {
        match status {
            QuestionStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status transitions exposed as `POST /api/question/:id/mark-*` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMutation {
    Corrected,
    Incorrect,
    NeedsReview,
}

impl StatusMutation {
    pub const ALL: [StatusMutation; 3] = [Self::Corrected, Self::Incorrect, Self::NeedsReview];

    /// Last path segment of the mark endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Corrected => "mark-corrected",
            Self::Incorrect => "mark-incorrect",
            Self::NeedsReview => "mark-needs_review",
        }
    }

    pub fn target(self) -> QuestionStatus {
        match self {
            Self::Corrected => QuestionStatus::Corrected,
            Self::Incorrect => QuestionStatus::Incorrect,
            Self::NeedsReview => QuestionStatus::NeedsReview,
        }
    }

    /// Button caption shown in the detail view.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Corrected => "Mark Corrected",
            Self::Incorrect => "Mark Incorrect",
            Self::NeedsReview => "Needs Review",
        }
    }

    /// Mutations offered for a question currently in `current`.
    pub fn available_from(current: &QuestionStatus) -> Vec<StatusMutation> {
        Self::ALL
            .into_iter()
            .filter(|mutation| &mutation.target() != current)
            .collect()
    }

    /// Parse the CLI spelling (`corrected`, `incorrect`, `needs_review`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "corrected" => Some(Self::Corrected),
            "incorrect" => Some(Self::Incorrect),
            "needs_review" => Some(Self::NeedsReview),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_round_trips_verbatim() {
        let status: QuestionStatus = serde_json::from_str("\"escalated\"").expect("decode");
        assert_eq!(status, QuestionStatus::Unknown("escalated".to_string()));
        assert_eq!(status.as_str(), "escalated");
        assert_eq!(status.color_hex(), "#344767");
        assert_eq!(
            serde_json::to_string(&status).expect("encode"),
            "\"escalated\""
        );
    }

    #[test]
    fn known_statuses_map_to_fixed_colors() {
        let status: QuestionStatus = serde_json::from_str("\"likely_correct\"").expect("decode");
        assert_eq!(status, QuestionStatus::LikelyCorrect);
        assert_eq!(status.label(), "likely correct");
        assert_eq!(QuestionStatus::Verified.color_hex(), "#2ecc71");
        assert_eq!(QuestionStatus::Corrected.color_hex(), "#1abc9c");
    }

    #[test]
    fn available_mutations_exclude_current_status() {
        assert_eq!(
            StatusMutation::available_from(&QuestionStatus::Corrected),
            vec![StatusMutation::Incorrect, StatusMutation::NeedsReview]
        );
        assert_eq!(
            StatusMutation::available_from(&QuestionStatus::Verified).len(),
            3
        );
    }

    #[test]
    fn parse_accepts_dash_and_underscore() {
        assert_eq!(
            StatusMutation::parse("needs-review"),
            Some(StatusMutation::NeedsReview)
        );
        assert_eq!(
            StatusMutation::parse("Corrected"),
            Some(StatusMutation::Corrected)
        );
        assert_eq!(StatusMutation::parse("verified"), None);
        assert_eq!(StatusMutation::NeedsReview.endpoint(), "mark-needs_review");
    }
}
