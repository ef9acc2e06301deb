//! Data models exchanged with the review API.

/// Page-image payloads for the image browser.
pub mod image;
/// Lenient number/bool decoding for pipeline-produced JSON.
mod lenient;
/// Question list rows, detail payloads, and model predictions.
pub mod question;
/// Request and acknowledgement payloads for mutating endpoints.
pub mod requests;
/// Question status values and status mutations.
pub mod status;

pub use image::{AvailablePages, ImageFiles, PageImage, PageImages};
pub use question::{
    AnswerKeyError, FileLocation, Prediction, QuestionDetail, QuestionId, QuestionSummary,
    QuestionsPage,
};
pub use requests::{
    ApiAck, AssignImageRequest, ChoicePayload, ExplanationRequest, UpdateQuestionRequest,
};
pub use status::{QuestionStatus, StatusMutation};
