use super::lenient;
use serde::{Deserialize, Serialize};

/// An image extracted from a source document page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    #[serde(default)]
    pub id: serde_json::Value,
    pub url: String,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub question_number: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_question_image: bool,
}

/// Payload of `GET /api/page_images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageImages {
    #[serde(default)]
    pub images: Vec<PageImage>,
    /// Path variant the server actually matched, when it differs from the query.
    #[serde(default)]
    pub original_query_path: Option<String>,
}

impl PageImages {
    /// True when the server resolved `requested` to a different stored path.
    pub fn matched_other_path(&self, requested: &str) -> bool {
        self.original_query_path
            .as_deref()
            .map(|path| path != requested)
            .unwrap_or(false)
    }
}

/// Payload of `GET /api/available_pages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailablePages {
    #[serde(default)]
    pub pages: Vec<i64>,
}

/// Payload of `GET /api/image_files`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFiles {
    #[serde(default)]
    pub files: Vec<String>,
}
