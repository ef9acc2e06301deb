//! Application state container for the question list.
//!
//! [`DashboardState`] owns everything the list controller derives from a fetched
//! collection: category colors, file options, the current filters, the selector
//! rows, and the selected id. It performs no I/O; callers feed it API results and
//! act on the [`Populate`] outcomes it returns.

use crate::consensus::ratio_glyph;
use crate::constants::{CATEGORY_PALETTE, FALLBACK_CATEGORY_COLOR, SELECTOR_TEXT_MAX_CHARS};
use crate::filter::FilterState;
use crate::models::{QuestionId, QuestionStatus, QuestionSummary, QuestionsPage};
use crate::text::{file_name, truncate_with_ellipsis};
use std::collections::HashMap;

/// Placeholder shown in the detail area when filtering leaves nothing.
pub const NO_MATCHES_MESSAGE: &str = "No questions match the selected filters.";
/// Placeholder shown in the selector when filtering leaves nothing.
pub const NO_MATCHES_OPTION: &str = "No questions match filters";

/// One selectable row in the question selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorEntry {
    pub id: QuestionId,
    pub label: String,
    pub status: QuestionStatus,
}

/// Result of rebuilding the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Populate {
    /// Nothing matched; show [`NO_MATCHES_MESSAGE`] and request no detail.
    Empty,
    /// Render this question's detail.
    Show {
        id: QuestionId,
        preserve_scroll: bool,
    },
}

/// What a filter edit requires from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Nothing changed.
    Unchanged,
    /// Re-run the predicate over the loaded collection.
    Repopulate,
    /// The file scope changed; the collection must be fetched again.
    Refetch,
}

/// Client-side state of the review dashboard.
#[derive(Debug, Default)]
pub struct DashboardState {
    questions: Vec<QuestionSummary>,
    loaded_scope: Option<String>,
    loaded: bool,
    categories: Vec<String>,
    category_colors: HashMap<String, &'static str>,
    available_files: Vec<String>,
    filters: FilterState,
    selector: Vec<SelectorEntry>,
    selected: Option<QuestionId>,
}

/// Selector label for `question`.
///
/// `file_filter_active` switches the position prefix to `array_order` and drops
/// the trailing file-name suffix.
pub fn selector_label(question: &QuestionSummary, file_filter_active: bool) -> String {
    let glyph = ratio_glyph(question.matching_models, question.models_count);
    let position = match question.array_order {
        Some(order) if file_filter_active => format!("{}: ", order),
        _ => format!("#{}: ", question.id),
    };
    let text = truncate_with_ellipsis(&question.enhanced_text, SELECTOR_TEXT_MAX_CHARS);
    let file_suffix = match question.representative_file_path.as_deref() {
        Some(path) if !file_filter_active => format!(" [{}]", file_name(path)),
        _ => String::new(),
    };
    format!("{} {}{}{}", glyph, position, text, file_suffix)
}

impl DashboardState {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Install a freshly fetched collection for `scope`.
    ///
    /// Derives categories (first-appearance order) and their palette colors,
    /// sorts the available file paths, and restores `last_file_filter` when it
    /// names one of them. Call [`DashboardState::populate`] afterwards.
    pub fn apply_questions(
        &mut self,
        page: QuestionsPage,
        scope: Option<String>,
        last_file_filter: Option<&str>,
    ) {
        self.questions = page.questions;
        self.loaded_scope = scope;
        self.loaded = true;

        self.categories.clear();
        for question in &self.questions {
            if !self.categories.contains(&question.category) {
                self.categories.push(question.category.clone());
            }
        }
        self.category_colors = self
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                (
                    category.clone(),
                    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
                )
            })
            .collect();

        let mut files = page.available_files;
        files.sort();
        files.dedup();
        self.available_files = files;

        if let Some(last) = last_file_filter {
            if self.available_files.iter().any(|path| path == last) {
                self.filters.file_path = Some(last.to_string());
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn questions(&self) -> &[QuestionSummary] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&QuestionSummary> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn loaded_scope(&self) -> Option<&str> {
        self.loaded_scope.as_deref()
    }

    /// Categories in first-appearance order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_color(&self, category: &str) -> &'static str {
        self.category_colors
            .get(category)
            .copied()
            .unwrap_or(FALLBACK_CATEGORY_COLOR)
    }

    pub fn available_files(&self) -> &[String] {
        &self.available_files
    }

    /// Sorted distinct statuses of the loaded collection.
    pub fn status_options(&self) -> Vec<String> {
        let mut statuses: Vec<String> = self
            .questions
            .iter()
            .map(|question| question.status.as_str().to_string())
            .collect();
        statuses.sort();
        statuses.dedup();
        statuses
    }

    /// Sorted categories.
    pub fn category_options(&self) -> Vec<String> {
        let mut categories = self.categories.clone();
        categories.sort();
        categories
    }

    /// `(path, display name)` pairs for the file selector.
    pub fn file_options(&self) -> Vec<(String, String)> {
        self.available_files
            .iter()
            .map(|path| (path.clone(), file_name(path).to_string()))
            .collect()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// File scope the collection should be fetched for.
    pub fn fetch_scope(&self) -> Option<String> {
        self.filters.file_path.clone()
    }

    /// Replace the filters and report what the caller must do next.
    pub fn set_filters(&mut self, filters: FilterState) -> FilterChange {
        if filters == self.filters {
            return FilterChange::Unchanged;
        }
        let scope_changed = filters.file_path != self.filters.file_path;
        self.filters = filters;
        if scope_changed {
            FilterChange::Refetch
        } else {
            FilterChange::Repopulate
        }
    }

    /// Drop restored filter values the loaded collection does not offer.
    pub fn reconcile_filters(&mut self) {
        let statuses = self.status_options();
        let categories = self.category_options();
        let files = self.available_files.clone();
        self.filters.retain_known(&statuses, &categories, &files);
    }

    /// Rebuild the selector from the loaded collection and the current filters.
    pub fn populate(&mut self, preserve_selection: bool) -> Populate {
        let file_filter_active = self.filters.file_path.is_some();
        let scope = self.loaded_scope.as_deref();
        self.selector = self
            .filters
            .apply(&self.questions, scope)
            .into_iter()
            .map(|question| SelectorEntry {
                id: question.id,
                label: selector_label(question, file_filter_active),
                status: question.status.clone(),
            })
            .collect();

        let Some(first) = self.selector.first().map(|entry| entry.id) else {
            self.selected = None;
            return Populate::Empty;
        };
        let kept = self
            .selected
            .filter(|_| preserve_selection)
            .filter(|id| self.position_of(*id).is_some());
        match kept {
            Some(id) => Populate::Show {
                id,
                preserve_scroll: true,
            },
            None => {
                self.selected = Some(first);
                Populate::Show {
                    id: first,
                    preserve_scroll: false,
                }
            }
        }
    }

    pub fn selector(&self) -> &[SelectorEntry] {
        &self.selector
    }

    pub fn selector_ids(&self) -> Vec<QuestionId> {
        self.selector.iter().map(|entry| entry.id).collect()
    }

    pub fn position_of(&self, id: QuestionId) -> Option<usize> {
        self.selector.iter().position(|entry| entry.id == id)
    }

    pub fn selected(&self) -> Option<QuestionId> {
        self.selected
    }

    /// Select `id` if it is currently listed.
    pub fn select(&mut self, id: QuestionId) -> bool {
        if self.position_of(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    fn patch(&mut self, id: QuestionId, apply: impl FnOnce(&mut QuestionSummary)) -> bool {
        match self.questions.iter_mut().find(|question| question.id == id) {
            Some(question) => {
                apply(question);
                true
            }
            None => false,
        }
    }

    /// Mirror a saved edit into the loaded summary.
    pub fn patch_edit(
        &mut self,
        id: QuestionId,
        enhanced_text: &str,
        category: &str,
        requires_image: bool,
    ) -> bool {
        self.patch(id, |question| {
            question.enhanced_text = enhanced_text.to_string();
            question.category = category.to_string();
            question.requires_image = requires_image;
        })
    }

    pub fn patch_status(&mut self, id: QuestionId, status: QuestionStatus) -> bool {
        self.patch(id, |question| question.status = status)
    }

    pub fn patch_image(&mut self, id: QuestionId, image_url: Option<String>) -> bool {
        self.patch(id, |question| question.image_url = image_url)
    }

    /// Repopulate after `id` was mutated and select the entry that follows it.
    ///
    /// If `id` dropped out of the filtered list, the entry that took its place is
    /// selected instead. Returns `None` when the list is now empty.
    pub fn advance_after(&mut self, id: QuestionId) -> Option<QuestionId> {
        let previous_index = self.position_of(id);
        if let Populate::Empty = self.populate(true) {
            return None;
        }
        let last = self.selector.len() - 1;
        let next_index = match (previous_index, self.position_of(id)) {
            (Some(_), Some(current)) => (current + 1).min(last),
            (Some(previous), None) => previous.min(last),
            (None, _) => self.selected.and_then(|sel| self.position_of(sel)).unwrap_or(0),
        };
        let next = self.selector[next_index].id;
        self.selected = Some(next);
        Some(next)
    }
}
