//! Image-browser state: where to start, which file/page is shown, and the
//! prev/next page strip.

use crate::models::{PageImage, PageImages, QuestionDetail, QuestionId};
use crate::text::file_name;

pub const NO_PAGE_INFO_MESSAGE: &str = "No page information available for this question";
pub const NO_PAGE_INFO_FOR_FILE_MESSAGE: &str = "No page information for this file";
pub const NO_IMAGES_MESSAGE: &str = "No images found for this page";
pub const FROM_FILTERED_FILE_NOTE: &str = " (from filtered file)";

/// A `(file, page, question number)` triple shown by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrowserLocation {
    pub file: String,
    pub page: i64,
    pub question_number: Option<i64>,
}

/// Last file/page a user picked an image from, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastImageLocation {
    pub file: String,
    pub page: i64,
}

fn usable_page(page: Option<i64>) -> Option<i64> {
    page.filter(|page| *page != 0)
}

fn triple(
    file: Option<&str>,
    page: Option<i64>,
    question_number: Option<i64>,
) -> Option<BrowserLocation> {
    let file = file.filter(|file| !file.is_empty())?;
    let page = usable_page(page)?;
    Some(BrowserLocation {
        file: file.to_string(),
        page,
        question_number,
    })
}

/// Resolve where the browser opens for `detail`.
///
/// Precedence: the file filter's own location entry, then the filter path with the
/// representative page, then (without a filter) the representative triple. When
/// none yields a file and page, `last_used` is the fallback.
pub fn resolve_initial_location(
    detail: &QuestionDetail,
    file_filter: Option<&str>,
    last_used: Option<&LastImageLocation>,
) -> Option<BrowserLocation> {
    let resolved = match file_filter {
        Some(filter) => match detail.location_for(filter) {
            Some(location) => triple(
                Some(location.file_path.as_str()),
                location.page,
                location.question_number,
            ),
            None => triple(
                Some(filter),
                detail.representative_page,
                detail.representative_question_number,
            ),
        },
        None => triple(
            detail.representative_file_path.as_deref(),
            detail.representative_page,
            detail.representative_question_number,
        ),
    };
    resolved.or_else(|| {
        last_used.and_then(|last| triple(Some(last.file.as_str()), Some(last.page), None))
    })
}

/// Location to show after switching the browser to `file`.
pub fn location_for_file(detail: &QuestionDetail, file: &str) -> Option<BrowserLocation> {
    match detail.location_for(file) {
        Some(location) => triple(Some(file), location.page, location.question_number),
        None => triple(
            Some(file),
            detail.representative_page,
            detail.representative_question_number,
        ),
    }
}

/// Caption under a thumbnail.
pub fn thumbnail_caption(image: &PageImage) -> String {
    match image.question_number {
        Some(number) => format!("Question {}", number),
        None => match &image.id {
            serde_json::Value::String(id) => format!("Image {}", id),
            serde_json::Value::Null => "Image".to_string(),
            other => format!("Image {}", other),
        },
    }
}

/// Entry in the browser's file selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChoice {
    pub path: String,
    pub name: String,
}

/// Image grid contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagesState {
    Idle,
    Loading,
    Loaded(PageImages),
    Failed(String),
}

/// Open image browser for one question.
#[derive(Debug, Clone)]
pub struct ImageBrowser {
    question_id: QuestionId,
    file_filter: Option<String>,
    files: Vec<FileChoice>,
    current: Option<BrowserLocation>,
    available_pages: Vec<i64>,
    images: ImagesState,
    message: Option<String>,
}

impl ImageBrowser {
    pub fn new(question_id: QuestionId, file_filter: Option<String>) -> Self {
        Self {
            question_id,
            file_filter,
            files: Vec::new(),
            current: None,
            available_pages: Vec::new(),
            images: ImagesState::Loading,
            message: None,
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn file_filter(&self) -> Option<&str> {
        self.file_filter.as_deref()
    }

    /// Populate from the fetched question. Returns the location to load, or
    /// `None` after setting the no-page-information message.
    pub fn open(
        &mut self,
        detail: &QuestionDetail,
        last_used: Option<&LastImageLocation>,
    ) -> Option<BrowserLocation> {
        self.files = detail
            .file_locations
            .iter()
            .map(|location| location.file_path.clone())
            .fold(Vec::new(), |mut files: Vec<FileChoice>, path| {
                if !files.iter().any(|choice| choice.path == path) {
                    files.push(FileChoice {
                        name: file_name(&path).to_string(),
                        path,
                    });
                }
                files
            });
        let location = resolve_initial_location(detail, self.file_filter.as_deref(), last_used);
        match &location {
            Some(found) => {
                self.add_file(&found.file);
                self.message = None;
                self.images = ImagesState::Loading;
            }
            None => {
                self.message = Some(NO_PAGE_INFO_MESSAGE.to_string());
                self.images = ImagesState::Idle;
            }
        }
        self.current = location.clone();
        location
    }

    fn add_file(&mut self, path: &str) {
        if !self.files.iter().any(|choice| choice.path == path) {
            self.files.push(FileChoice {
                path: path.to_string(),
                name: file_name(path).to_string(),
            });
        }
    }

    /// Append files from `GET /api/image_files` not already offered.
    pub fn extend_files<I: IntoIterator<Item = String>>(&mut self, files: I) {
        for path in files {
            self.add_file(&path);
        }
    }

    pub fn files(&self) -> &[FileChoice] {
        &self.files
    }

    /// Switch to `file`, re-resolving the page from the question's locations.
    pub fn select_file(&mut self, detail: &QuestionDetail, file: &str) -> Option<BrowserLocation> {
        let location = location_for_file(detail, file);
        match &location {
            Some(_) => {
                self.message = None;
                self.images = ImagesState::Loading;
            }
            None => {
                self.message = Some(NO_PAGE_INFO_FOR_FILE_MESSAGE.to_string());
                self.images = ImagesState::Idle;
                self.available_pages.clear();
            }
        }
        self.current = location.clone();
        location
    }

    pub fn current(&self) -> Option<&BrowserLocation> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn available_pages(&self) -> &[i64] {
        &self.available_pages
    }

    /// Install the page list for `file`; ignored if the browser moved on.
    pub fn set_available_pages(&mut self, file: &str, pages: Vec<i64>) {
        if self.current.as_ref().map(|c| c.file.as_str()) == Some(file) {
            self.available_pages = pages;
        }
    }

    fn page_index(&self) -> Option<usize> {
        let page = self.current.as_ref()?.page;
        self.available_pages.iter().position(|p| *p == page)
    }

    pub fn can_prev(&self) -> bool {
        matches!(self.page_index(), Some(index) if index > 0)
    }

    /// A page not in the list can still step forward onto the first page.
    pub fn can_next(&self) -> bool {
        match self.page_index() {
            Some(index) => index + 1 < self.available_pages.len(),
            None => !self.available_pages.is_empty(),
        }
    }

    fn step_to(&mut self, page: i64) -> Option<BrowserLocation> {
        let current = self.current.as_mut()?;
        current.page = page;
        self.images = ImagesState::Loading;
        Some(current.clone())
    }

    pub fn prev_page(&mut self) -> Option<BrowserLocation> {
        if !self.can_prev() {
            return None;
        }
        let index = self.page_index()?;
        let page = self.available_pages[index - 1];
        self.step_to(page)
    }

    pub fn next_page(&mut self) -> Option<BrowserLocation> {
        if !self.can_next() {
            return None;
        }
        let page = match self.page_index() {
            Some(index) => self.available_pages[index + 1],
            None => self.available_pages[0],
        };
        self.step_to(page)
    }

    pub fn images(&self) -> &ImagesState {
        &self.images
    }

    /// Install images for `location`; results for a location no longer shown are dropped.
    pub fn set_images(
        &mut self,
        location: &BrowserLocation,
        result: Result<PageImages, String>,
    ) -> bool {
        if self.current.as_ref() != Some(location) {
            return false;
        }
        self.images = match result {
            Ok(images) => ImagesState::Loaded(images),
            Err(message) => ImagesState::Failed(message),
        };
        true
    }

    /// Page caption, flagged when the server matched another path variant.
    pub fn page_caption(&self) -> Option<String> {
        let current = self.current.as_ref()?;
        let note = match &self.images {
            ImagesState::Loaded(images) if images.matched_other_path(&current.file) => {
                FROM_FILTERED_FILE_NOTE
            }
            _ => "",
        };
        Some(format!("Page {}{}", current.page, note))
    }

    /// File and page to persist after an image is chosen.
    pub fn last_used(&self) -> Option<LastImageLocation> {
        self.current.as_ref().map(|current| LastImageLocation {
            file: current.file.clone(),
            page: current.page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> QuestionDetail {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "status": "needs_review",
            "choices": ["a"],
            "is_correct": ["true"],
            "representative_file_path": "exams/main.pdf",
            "representative_page": 4,
            "representative_question_number": 9,
            "file_locations": [
                {"file_path": "exams/main.pdf", "page": 4, "question_number": 9},
                {"file_path": "exams/dup.pdf", "page": 12, "question_number": 2},
            ],
        }))
        .expect("decode detail")
    }

    fn location(file: &str, page: i64, question_number: Option<i64>) -> BrowserLocation {
        BrowserLocation {
            file: file.to_string(),
            page,
            question_number,
        }
    }

    #[test]
    fn initial_location_precedence() {
        let question = detail();
        assert_eq!(
            resolve_initial_location(&question, Some("exams/dup.pdf"), None),
            Some(location("exams/dup.pdf", 12, Some(2)))
        );
        assert_eq!(
            resolve_initial_location(&question, Some("exams/other.pdf"), None),
            Some(location("exams/other.pdf", 4, Some(9)))
        );
        assert_eq!(
            resolve_initial_location(&question, None, None),
            Some(location("exams/main.pdf", 4, Some(9)))
        );
    }

    #[test]
    fn missing_page_falls_back_to_last_used_or_message() {
        let mut question = detail();
        question.representative_page = None;
        question.file_locations.clear();
        let last = LastImageLocation {
            file: "exams/last.pdf".to_string(),
            page: 7,
        };
        assert_eq!(
            resolve_initial_location(&question, None, Some(&last)),
            Some(location("exams/last.pdf", 7, None))
        );

        let mut browser = ImageBrowser::new(5, None);
        assert_eq!(browser.open(&question, None), None);
        assert_eq!(browser.message(), Some(NO_PAGE_INFO_MESSAGE));
    }

    #[test]
    fn file_selector_lists_locations_then_extra_files() {
        let mut browser = ImageBrowser::new(5, Some("exams/other.pdf".to_string()));
        browser.open(&detail(), None);
        browser.extend_files(vec!["exams/dup.pdf".to_string(), "misc/x.pdf".to_string()]);
        let names: Vec<&str> = browser.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["main.pdf", "dup.pdf", "other.pdf", "x.pdf"]);
    }

    #[test]
    fn page_strip_uses_available_page_positions() {
        let mut browser = ImageBrowser::new(5, None);
        browser.open(&detail(), None);
        assert!(!browser.can_prev());
        assert!(!browser.can_next());

        browser.set_available_pages("exams/main.pdf", vec![2, 4, 6]);
        assert!(browser.can_prev());
        assert!(browser.can_next());
        assert_eq!(browser.next_page(), Some(location("exams/main.pdf", 6, Some(9))));
        assert!(!browser.can_next());
        assert_eq!(browser.next_page(), None);
        assert_eq!(browser.prev_page().map(|l| l.page), Some(4));
        assert_eq!(browser.prev_page().map(|l| l.page), Some(2));
        assert!(!browser.can_prev());
    }

    #[test]
    fn unknown_page_steps_forward_to_first_page() {
        let mut browser = ImageBrowser::new(5, None);
        browser.open(&detail(), None);
        browser.set_available_pages("exams/main.pdf", vec![10, 11]);
        assert!(!browser.can_prev());
        assert_eq!(browser.next_page().map(|l| l.page), Some(10));
    }

    #[test]
    fn select_file_uses_location_or_representative_page() {
        let question = detail();
        let mut browser = ImageBrowser::new(5, None);
        browser.open(&question, None);
        assert_eq!(
            browser.select_file(&question, "exams/dup.pdf"),
            Some(location("exams/dup.pdf", 12, Some(2)))
        );
        assert_eq!(
            browser.select_file(&question, "misc/x.pdf"),
            Some(location("misc/x.pdf", 4, Some(9)))
        );
    }

    #[test]
    fn stale_images_are_dropped_and_caption_notes_variant() {
        let mut browser = ImageBrowser::new(5, None);
        let current = browser.open(&detail(), None).expect("location");
        let stale = location("exams/main.pdf", 99, None);
        assert!(!browser.set_images(&stale, Ok(PageImages::default())));
        assert_eq!(browser.images(), &ImagesState::Loading);

        let images = PageImages {
            images: Vec::new(),
            original_query_path: Some("/abs/exams/main.pdf".to_string()),
        };
        assert!(browser.set_images(&current, Ok(images)));
        assert_eq!(
            browser.page_caption().as_deref(),
            Some("Page 4 (from filtered file)")
        );
        assert_eq!(
            browser.last_used(),
            Some(LastImageLocation {
                file: "exams/main.pdf".to_string(),
                page: 4
            })
        );
    }

    #[test]
    fn thumbnail_caption_prefers_question_number() {
        let image: PageImage = serde_json::from_value(serde_json::json!({
            "id": "img-3", "url": "/static/img.png", "question_number": 6,
        }))
        .expect("decode image");
        assert_eq!(thumbnail_caption(&image), "Question 6");
        let image: PageImage =
            serde_json::from_value(serde_json::json!({"id": 3, "url": "/x.png"})).expect("decode");
        assert_eq!(thumbnail_caption(&image), "Image 3");
    }
}
