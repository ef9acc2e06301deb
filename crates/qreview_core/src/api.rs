//! Blocking client for the question review REST API.

use crate::config::{normalize_api_url, Config};
use crate::error::AppError;
use crate::models::{
    ApiAck, AssignImageRequest, AvailablePages, ExplanationRequest, ImageFiles, PageImages,
    QuestionDetail, QuestionId, QuestionsPage, StatusMutation, UpdateQuestionRequest,
};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Extract a human-readable message from an error response body.
///
/// Prefers a JSON `error` (or `message`) field, then the raw body, then the
/// status reason phrase.
pub fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return failure_in_body(&value).unwrap_or_else(|| body.to_string());
    }
    body.to_string()
}

/// Failure signalled inside a JSON body: an `error` field or `"status": "error"`.
fn failure_in_body(value: &Value) -> Option<String> {
    if let Some(error) = value.get("error") {
        match error {
            Value::Null => {}
            Value::String(message) if message.trim().is_empty() => {}
            Value::String(message) => return Some(message.clone()),
            other => return Some(other.to_string()),
        }
    }
    if value.get("status").and_then(Value::as_str) == Some("error") {
        return Some(
            value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        );
    }
    None
}

/// Append path segments to `base`, keeping any base path prefix.
pub fn api_url(base: &Url, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(format!("{} cannot be used as an API base", base)))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Resolve an image URL reported by the server against the API base.
///
/// Absolute URLs pass through unchanged; relative paths such as
/// `/static/pages/3.png` are joined onto `base`.
pub fn resolve_asset_url(base: &str, raw: &str) -> String {
    if Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    match Url::parse(base).and_then(|base| base.join(raw)) {
        Ok(url) => url.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// REST client shared by the GUI worker and the CLI.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let normalized = normalize_api_url(base_url);
        let base = Url::parse(&normalized)
            .map_err(|err| AppError::InvalidUrl(format!("'{}': {}", normalized, err)))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        api_url(&self.base, segments)
    }

    fn question_url(&self, id: QuestionId, tail: &[&str]) -> Result<Url, AppError> {
        let id = id.to_string();
        let mut segments = vec!["api", "question", id.as_str()];
        segments.extend_from_slice(tail);
        self.url(&segments)
    }

    fn send_value(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response");
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND && body.trim().is_empty() {
                return Err(AppError::NotFound);
            }
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message_for_response(status, &body),
            });
        }
        let value: Value = serde_json::from_str(&body)?;
        if let Some(message) = failure_in_body(&value) {
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(value)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let value = self.send_value(request)?;
        Ok(serde_json::from_value(value)?)
    }

    fn with_scope(request: RequestBuilder, scope: Option<&str>) -> RequestBuilder {
        match scope {
            Some(path) => request.query(&[("file_path", path)]),
            None => request,
        }
    }

    /// `GET /api/questions[?file_path=]`
    pub fn list_questions(&self, scope: Option<&str>) -> Result<QuestionsPage, AppError> {
        let url = self.url(&["api", "questions"])?;
        self.send(Self::with_scope(self.http.get(url), scope))
    }

    /// `GET /api/question/:id[?file_path=]`
    pub fn get_question(
        &self,
        id: QuestionId,
        scope: Option<&str>,
    ) -> Result<QuestionDetail, AppError> {
        let url = self.question_url(id, &[])?;
        self.send(Self::with_scope(self.http.get(url), scope))
    }

    /// `POST /api/question/:id`
    pub fn update_question(
        &self,
        id: QuestionId,
        update: &UpdateQuestionRequest,
    ) -> Result<ApiAck, AppError> {
        let url = self.question_url(id, &[])?;
        self.send(self.http.post(url).json(update))
    }

    /// `POST /api/question/:id/mark-*`
    pub fn mark_status(
        &self,
        id: QuestionId,
        mutation: StatusMutation,
    ) -> Result<ApiAck, AppError> {
        let url = self.question_url(id, &[mutation.endpoint()])?;
        self.send(self.http.post(url))
    }

    /// `POST /api/question/:id/image` with a multipart `image` part.
    pub fn upload_image(
        &self,
        id: QuestionId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ApiAck, AppError> {
        let url = self.question_url(id, &["image"])?;
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("image", part);
        self.send(self.http.post(url).multipart(form))
    }

    /// `POST /api/question/:id/image` with `{image_url}`.
    pub fn assign_image(&self, id: QuestionId, image_url: &str) -> Result<ApiAck, AppError> {
        let url = self.question_url(id, &["image"])?;
        let body = AssignImageRequest {
            image_url: image_url.to_string(),
        };
        self.send(self.http.post(url).json(&body))
    }

    /// `DELETE /api/question/:id/image`
    pub fn remove_image(&self, id: QuestionId) -> Result<ApiAck, AppError> {
        let url = self.question_url(id, &["image"])?;
        self.send(self.http.delete(url))
    }

    /// `GET /api/image_files`
    pub fn image_files(&self) -> Result<ImageFiles, AppError> {
        let url = self.url(&["api", "image_files"])?;
        self.send(self.http.get(url))
    }

    /// `GET /api/available_pages?file_path=`
    pub fn available_pages(&self, file: &str) -> Result<AvailablePages, AppError> {
        let url = self.url(&["api", "available_pages"])?;
        self.send(self.http.get(url).query(&[("file_path", file)]))
    }

    /// `GET /api/page_images?file_path=&page_number=[&question_number=]`
    pub fn page_images(
        &self,
        file: &str,
        page: i64,
        question_number: Option<i64>,
    ) -> Result<PageImages, AppError> {
        let url = self.url(&["api", "page_images"])?;
        let mut query = vec![
            ("file_path", file.to_string()),
            ("page_number", page.to_string()),
        ];
        if let Some(number) = question_number.filter(|n| *n != 0) {
            query.push(("question_number", number.to_string()));
        }
        self.send(self.http.get(url).query(&query))
    }

    /// `POST /api/generate_explanation`; returns the generated text.
    pub fn generate_explanation(&self, request: &ExplanationRequest) -> Result<String, AppError> {
        let url = self.url(&["api", "generate_explanation"])?;
        let ack: ApiAck = self.send(self.http.post(url).json(request))?;
        match (ack.status.as_deref(), ack.explanation) {
            (Some("success"), Some(explanation)) => Ok(explanation),
            _ => Err(AppError::Api {
                status: 200,
                message: "Unknown error".to_string(),
            }),
        }
    }
}
