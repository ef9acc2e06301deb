//! Core domain library for QReview (models, filtering, caching, REST client).

/// Blocking REST client for the question review API.
pub mod api;
/// Image-browser state machine (location resolution, page stepping).
pub mod browser;
/// Composite-key caches for question details and page images.
pub mod cache;
/// Configuration loading and defaults.
pub mod config;
/// Consensus classification over model predictions.
pub mod consensus;
/// Shared constants (storage keys, palette, limits).
pub mod constants;
/// Application state container: loaded questions, filters, selector.
pub mod dashboard;
/// Edit-form draft with dirty tracking and validation.
pub mod draft;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types.
pub mod error;
/// Filter state and the client-side question predicate.
pub mod filter;
/// Modal stack for previews and dialogs.
pub mod modal;
/// Data models for API payloads.
pub mod models;
/// Prev/next navigation and swipe detection.
pub mod navigation;
/// Durable key/value storage and the filter store.
pub mod storage;
/// Text helpers (escaping, truncation, file names).
pub mod text;
/// Pure view models for the detail renderer.
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use api::ApiClient;
pub use config::Config;
pub use constants::*;
pub use dashboard::DashboardState;
pub use error::AppError;
