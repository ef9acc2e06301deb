//! Filter selections and the client-side predicate applied to loaded questions.

use crate::constants::FILTER_ALL;
use crate::models::{QuestionId, QuestionSummary};
use serde::{Deserialize, Serialize};

/// Image-requirement filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiresImage {
    #[default]
    All,
    Yes,
    No,
}

impl RequiresImage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => FILTER_ALL,
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Parse a persisted value; unknown values fall back to [`RequiresImage::All`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "yes" => Self::Yes,
            "no" => Self::No,
            _ => Self::All,
        }
    }

    pub fn matches(self, requires_image: bool) -> bool {
        match self {
            Self::All => true,
            Self::Yes => requires_image,
            Self::No => !requires_image,
        }
    }
}

/// Current filter selections. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredFilters", into = "StoredFilters")]
pub struct FilterState {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: String,
    pub requires_image: RequiresImage,
    pub file_path: Option<String>,
}

/// Flat persisted shape with `"all"` sentinels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFilters {
    #[serde(default = "all")]
    status: String,
    #[serde(default = "all")]
    category: String,
    #[serde(default)]
    search: String,
    #[serde(default = "all")]
    requires_image: String,
    #[serde(default = "all")]
    file_path: String,
}

fn all() -> String {
    FILTER_ALL.to_string()
}

fn from_sentinel(raw: String) -> Option<String> {
    if raw.is_empty() || raw == FILTER_ALL {
        None
    } else {
        Some(raw)
    }
}

fn to_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(all)
}

impl From<StoredFilters> for FilterState {
    fn from(stored: StoredFilters) -> Self {
        Self {
            status: from_sentinel(stored.status),
            category: from_sentinel(stored.category),
            search: stored.search,
            requires_image: RequiresImage::parse(&stored.requires_image),
            file_path: from_sentinel(stored.file_path),
        }
    }
}

impl From<FilterState> for StoredFilters {
    fn from(state: FilterState) -> Self {
        Self {
            status: to_sentinel(state.status),
            category: to_sentinel(state.category),
            search: state.search,
            requires_image: state.requires_image.as_str().to_string(),
            file_path: to_sentinel(state.file_path),
        }
    }
}

/// Integer value of the leading digits of a search term, ignoring zero.
fn leading_id(term: &str) -> Option<QuestionId> {
    let digits: String = term
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse::<QuestionId>().ok().filter(|id| *id != 0)
}

impl FilterState {
    /// True when no selection restricts the list.
    pub fn is_unrestricted(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.search.trim().is_empty()
            && self.requires_image == RequiresImage::All
            && self.file_path.is_none()
    }

    fn matches_search(&self, question: &QuestionSummary) -> bool {
        let term = self.search.to_lowercase();
        if term.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&term);
        contains(&question.enhanced_text)
            || question
                .original_question_text
                .as_deref()
                .map(contains)
                .unwrap_or(false)
            || question.duplicate_texts().any(contains)
            || leading_id(&term) == Some(question.id)
    }

    /// Whether `question` passes every active filter.
    ///
    /// `loaded_scope` is the file path the collection was fetched for. The file
    /// filter is only re-checked client-side when it differs from that scope.
    pub fn matches(&self, question: &QuestionSummary, loaded_scope: Option<&str>) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .map(|status| question.status.as_str() == status)
            .unwrap_or(true);
        let category_ok = self
            .category
            .as_deref()
            .map(|category| question.category == category)
            .unwrap_or(true);
        let file_ok = match self.file_path.as_deref() {
            Some(path) if loaded_scope != Some(path) => {
                question.representative_file_path.as_deref() == Some(path)
            }
            _ => true,
        };
        status_ok
            && category_ok
            && file_ok
            && self.requires_image.matches(question.requires_image)
            && self.matches_search(question)
    }

    /// Questions passing the filter, in collection order.
    pub fn apply<'a>(
        &self,
        questions: &'a [QuestionSummary],
        loaded_scope: Option<&str>,
    ) -> Vec<&'a QuestionSummary> {
        questions
            .iter()
            .filter(|question| self.matches(question, loaded_scope))
            .collect()
    }

    /// Drop restored selections that are not offered by the current option lists.
    pub fn retain_known(&mut self, statuses: &[String], categories: &[String], files: &[String]) {
        if let Some(status) = &self.status {
            if !statuses.contains(status) {
                self.status = None;
            }
        }
        if let Some(category) = &self.category {
            if !categories.contains(category) {
                self.category = None;
            }
        }
        if let Some(path) = &self.file_path {
            if !files.contains(path) {
                self.file_path = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionSummary;

    fn question(id: i64, status: &str, text: &str) -> QuestionSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "enhanced_text": text,
            "category": if id % 2 == 0 { "math" } else { "physics" },
            "status": status,
            "requires_image": id % 3 == 0,
            "representative_file_path": format!("docs/file{}.pdf", id % 2),
            "duplicate_question_texts": "Alpha variant||Beta Variant",
        }))
        .expect("decode summary")
    }

    #[test]
    fn persisted_shape_uses_all_sentinels() {
        let state = FilterState {
            status: Some("verified".to_string()),
            requires_image: RequiresImage::No,
            ..FilterState::default()
        };
        let json = serde_json::to_value(&state).expect("encode");
        assert_eq!(
            json,
            serde_json::json!({
                "status": "verified",
                "category": "all",
                "search": "",
                "requiresImage": "no",
                "filePath": "all",
            })
        );
        let decoded: FilterState = serde_json::from_value(json).expect("decode");
        assert_eq!(decoded, state);

        let partial: FilterState =
            serde_json::from_str(r#"{"search":"gas","requiresImage":"bogus"}"#).expect("decode");
        assert_eq!(partial.search, "gas");
        assert_eq!(partial.requires_image, RequiresImage::All);
        assert!(partial.status.is_none());
    }

    #[test]
    fn search_covers_duplicates_and_numeric_ids() {
        let questions = vec![question(12, "verified", "Speed of light")];
        let mut filter = FilterState {
            search: "beta".to_string(),
            ..FilterState::default()
        };
        assert_eq!(filter.apply(&questions, None).len(), 1);

        filter.search = "12".to_string();
        assert_eq!(filter.apply(&questions, None).len(), 1);

        filter.search = "LIGHT".to_string();
        assert_eq!(filter.apply(&questions, None).len(), 1);

        filter.search = "gravity".to_string();
        assert!(filter.apply(&questions, None).is_empty());
    }

    #[test]
    fn status_filter_selects_exact_matches() {
        let questions: Vec<_> = (1..=10)
            .map(|id| {
                let status = if id % 3 == 0 { "needs_review" } else { "verified" };
                question(id, status, "text")
            })
            .collect();
        let filter = FilterState {
            status: Some("needs_review".to_string()),
            ..FilterState::default()
        };
        let first = filter.apply(&questions, None);
        assert_eq!(
            first.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![3, 6, 9]
        );

        let owned: Vec<QuestionSummary> = first.into_iter().cloned().collect();
        assert_eq!(filter.apply(&owned, None).len(), 3);
    }

    #[test]
    fn file_filter_is_skipped_when_collection_already_scoped() {
        let questions = vec![question(1, "verified", "a"), question(2, "verified", "b")];
        let filter = FilterState {
            file_path: Some("docs/file0.pdf".to_string()),
            ..FilterState::default()
        };
        assert_eq!(filter.apply(&questions, None).len(), 1);
        assert_eq!(filter.apply(&questions, Some("docs/file0.pdf")).len(), 2);
    }

    #[test]
    fn requires_image_filter_checks_flag() {
        let questions = vec![question(3, "verified", "a"), question(4, "verified", "b")];
        let mut filter = FilterState {
            requires_image: RequiresImage::Yes,
            ..FilterState::default()
        };
        assert_eq!(filter.apply(&questions, None)[0].id, 3);
        filter.requires_image = RequiresImage::No;
        assert_eq!(filter.apply(&questions, None)[0].id, 4);
    }

    #[test]
    fn retain_known_drops_missing_options() {
        let mut filter = FilterState {
            status: Some("corrected".to_string()),
            category: Some("math".to_string()),
            file_path: Some("gone.pdf".to_string()),
            ..FilterState::default()
        };
        filter.retain_known(
            &["verified".to_string()],
            &["math".to_string()],
            &["docs/a.pdf".to_string()],
        );
        assert!(filter.status.is_none());
        assert_eq!(filter.category.as_deref(), Some("math"));
        assert!(filter.file_path.is_none());
    }
}
