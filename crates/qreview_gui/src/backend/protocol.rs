//! Command/event protocol between the UI thread and the backend worker.

use qreview_core::browser::BrowserLocation;
use qreview_core::models::{
    ExplanationRequest, PageImages, QuestionDetail, QuestionId, QuestionsPage, StatusMutation,
    UpdateQuestionRequest,
};
use std::path::PathBuf;

/// Commands sent from the UI thread to the backend worker.
#[derive(Debug)]
pub enum CoreCmd {
    /// Fetch the question collection, optionally scoped to one source file.
    LoadQuestions { scope: Option<String> },
    /// Fetch one question's detail (served from cache when present).
    LoadDetail {
        id: QuestionId,
        scope: Option<String>,
    },
    /// Persist edit-form changes, optionally chaining a mark-corrected call.
    SaveEdits {
        id: QuestionId,
        update: UpdateQuestionRequest,
        mark_corrected: bool,
    },
    /// Move a question to another review status.
    MarkStatus {
        id: QuestionId,
        mutation: StatusMutation,
    },
    /// Upload a local image file as the question's image.
    UploadImage { id: QuestionId, path: PathBuf },
    /// Attach an existing page image by URL.
    AssignImage { id: QuestionId, image_url: String },
    /// Detach the question's image.
    RemoveImage { id: QuestionId },
    /// Ask the server to draft an explanation for the edit form.
    GenerateExplanation {
        id: QuestionId,
        request: ExplanationRequest,
    },
    /// Fetch what the image browser needs to open: the scoped detail plus the
    /// server's list of image files.
    OpenBrowser {
        id: QuestionId,
        scope: Option<String>,
    },
    /// Fetch the page numbers that have images for one file.
    LoadAvailablePages { file: String },
    /// Fetch the images on one page.
    LoadPageImages { location: BrowserLocation },
}

/// How a failure is presented to the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// Rendered in place of the content that failed to load.
    Inline,
    /// Shown in a blocking alert dialog.
    Alert,
}

/// Operation a backend error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorSource {
    Questions,
    Detail(QuestionId),
    Browser(QuestionId),
    Save(QuestionId),
    Status(QuestionId),
    Image(QuestionId),
    Explanation(QuestionId),
}

impl CoreErrorSource {
    pub fn surface(self) -> ErrorSurface {
        match self {
            CoreErrorSource::Questions
            | CoreErrorSource::Detail(_)
            | CoreErrorSource::Browser(_) => ErrorSurface::Inline,
            CoreErrorSource::Save(_)
            | CoreErrorSource::Status(_)
            | CoreErrorSource::Image(_)
            | CoreErrorSource::Explanation(_) => ErrorSurface::Alert,
        }
    }

    /// Question the failed operation targeted, if any.
    pub fn question_id(self) -> Option<QuestionId> {
        match self {
            CoreErrorSource::Questions => None,
            CoreErrorSource::Detail(id)
            | CoreErrorSource::Browser(id)
            | CoreErrorSource::Save(id)
            | CoreErrorSource::Status(id)
            | CoreErrorSource::Image(id)
            | CoreErrorSource::Explanation(id) => Some(id),
        }
    }
}

/// Which image operation produced an [`CoreEvent::ImageChanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageChange {
    Uploaded,
    Assigned,
    Removed,
}

/// Events produced by the backend worker.
#[derive(Debug)]
pub enum CoreEvent {
    /// Response containing the question collection for `scope`.
    QuestionsLoaded {
        scope: Option<String>,
        page: QuestionsPage,
    },
    /// Response containing one question's detail.
    DetailLoaded {
        id: QuestionId,
        scope: Option<String>,
        detail: QuestionDetail,
    },
    /// Edits were saved; `marked_corrected` reports whether the chained
    /// status change also succeeded.
    EditsSaved {
        id: QuestionId,
        update: UpdateQuestionRequest,
        marked_corrected: bool,
    },
    /// A status mutation succeeded.
    StatusMarked {
        id: QuestionId,
        mutation: StatusMutation,
    },
    /// The question's image was uploaded, assigned, or removed.
    ImageChanged {
        id: QuestionId,
        image_url: Option<String>,
        change: ImageChange,
    },
    /// Generated explanation text for the edit form.
    ExplanationGenerated {
        id: QuestionId,
        explanation: String,
    },
    /// Everything the image browser needs to resolve its starting page.
    BrowserReady {
        id: QuestionId,
        detail: QuestionDetail,
        image_files: Vec<String>,
    },
    /// Page numbers with images for `file` (empty on failure).
    AvailablePagesLoaded { file: String, pages: Vec<i64> },
    /// Images for one page, or the failure message.
    PageImagesLoaded {
        location: BrowserLocation,
        result: Result<PageImages, String>,
    },
    /// A backend failure occurred (transport, server error, etc).
    Error {
        source: CoreErrorSource,
        message: String,
    },
}
